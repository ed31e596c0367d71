//! Core types for the application log store.
//!
//! This module provides:
//! - [`LogRecord`]: One log line pushed by an application
//! - [`LogQuery`]: Application, level filter and limit for a read
//! - [`LevelMatch`]: How the level filter is applied to stored lines
//! - [`MissingApplication`]: What a query does for an unknown application

use serde::{Deserialize, Serialize};

use crate::codec::{LEVEL_SEPARATOR, MESSAGE_SEPARATOR};
use crate::error::RecordError;

/// Number of records returned when no usable limit is supplied.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// A structured log record.
///
/// `application_id` selects the partition and is never written into the
/// line itself. Records decoded by a query carry the queried application id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogRecord {
    /// Owning application.
    pub application_id: String,
    /// Free-text severity token, e.g. `ERROR`.
    #[serde(rename = "log_level")]
    pub level: String,
    /// Caller-supplied timestamp text.
    pub timestamp: String,
    /// The log message.
    #[serde(rename = "log_message")]
    pub message: String,
}

impl LogRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(
        application_id: impl Into<String>,
        level: impl Into<String>,
        timestamp: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            application_id: application_id.into(),
            level: level.into(),
            timestamp: timestamp.into(),
            message: message.into(),
        }
    }

    /// Checks that the record can be stored as exactly one decodable line.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint, checked in field order.
    pub fn validate(&self) -> Result<(), RecordError> {
        validate_application_id(&self.application_id)?;
        validate_bracketed("log_level", &self.level)?;
        validate_bracketed("timestamp", &self.timestamp)?;
        require_single_line("log_message", &self.message)?;
        if self.message.ends_with('\r') {
            return Err(RecordError::TrailingCarriageReturn("log_message"));
        }
        Ok(())
    }
}

fn require_single_line(field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.is_empty() {
        return Err(RecordError::Empty(field));
    }
    if value.contains('\n') {
        return Err(RecordError::ContainsNewline(field));
    }
    Ok(())
}

fn validate_bracketed(field: &'static str, value: &str) -> Result<(), RecordError> {
    require_single_line(field, value)?;
    for separator in [LEVEL_SEPARATOR, MESSAGE_SEPARATOR] {
        if value.contains(separator) {
            return Err(RecordError::ContainsSeparator { field, separator });
        }
    }
    Ok(())
}

/// Validates that an application id names exactly one directory under the
/// store root.
///
/// # Errors
///
/// Returns [`RecordError::Empty`] or [`RecordError::UnsafeApplicationId`].
pub fn validate_application_id(application_id: &str) -> Result<(), RecordError> {
    if application_id.is_empty() {
        return Err(RecordError::Empty("application_id"));
    }
    let unsafe_name = application_id == "."
        || application_id == ".."
        || application_id.contains(['/', '\\', '\0', '\n', '\r']);
    if unsafe_name {
        return Err(RecordError::UnsafeApplicationId(application_id.to_string()));
    }
    Ok(())
}

/// How the level filter selects stored lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelMatch {
    /// The filter appears anywhere in the raw line, message included.
    #[default]
    Contains,
    /// The decoded level equals the filter.
    Exact,
}

impl LevelMatch {
    /// Returns the string representation of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Exact => "exact",
        }
    }

    /// Parses a mode name, case-insensitively.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "contains" => Some(Self::Contains),
            "exact" => Some(Self::Exact),
            _ => None,
        }
    }
}

/// What a query does when the application directory does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingApplication {
    /// Fail with a store error, like any other listing failure.
    #[default]
    Fail,
    /// Return an empty result.
    Empty,
}

/// A read request against one application's partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    /// Application whose partitions are scanned.
    pub application_id: String,
    /// Level filter text.
    pub level: String,
    /// Maximum number of records returned.
    pub limit: usize,
    /// How `level` is matched.
    pub mode: LevelMatch,
}

impl LogQuery {
    /// Creates a query with the default limit and substring matching.
    #[must_use]
    pub fn new(application_id: impl Into<String>, level: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            level: level.into(),
            limit: DEFAULT_QUERY_LIMIT,
            mode: LevelMatch::Contains,
        }
    }

    /// Sets the limit; zero falls back to [`DEFAULT_QUERY_LIMIT`].
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = if limit == 0 { DEFAULT_QUERY_LIMIT } else { limit };
        self
    }

    /// Sets the level matching mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: LevelMatch) -> Self {
        self.mode = mode;
        self
    }
}

/// Parses a raw `limit` parameter.
///
/// Absent, unparseable and non-positive values all yield
/// [`DEFAULT_QUERY_LIMIT`].
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|n| *n > 0)
        .and_then(|n| usize::try_from(n).ok())
        .unwrap_or(DEFAULT_QUERY_LIMIT)
}
