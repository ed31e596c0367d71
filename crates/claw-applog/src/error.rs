//! Error types for the application log store.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the partitioned log store.
///
/// Every variant except [`StoreError::InvalidRecord`] is an I/O failure and
/// carries the path that was being touched. Callers at the HTTP boundary log
/// the path and return a generic message.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The application directory could not be created.
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A partition file could not be opened.
    #[error("failed to open {}: {source}", path.display())]
    Open {
        /// File that could not be opened.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// An encoded line could not be appended.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File that could not be written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The application directory could not be listed.
    #[error("failed to list {}: {source}", path.display())]
    ListDir {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A partition file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The record violates the line format invariants.
    #[error("invalid record: {0}")]
    InvalidRecord(#[from] RecordError),
}

impl StoreError {
    /// Returns true if the failure was caused by a missing file or directory.
    ///
    /// Querying an application that never logged anything fails this way.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.io_error()
            .is_some_and(|e| e.kind() == io::ErrorKind::NotFound)
    }

    /// Returns the underlying I/O error, if any.
    #[must_use]
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::CreateDir { source, .. }
            | Self::Open { source, .. }
            | Self::Write { source, .. }
            | Self::ListDir { source, .. }
            | Self::Read { source, .. } => Some(source),
            Self::InvalidRecord(_) => None,
        }
    }
}

/// Validation failures for a [`LogRecord`](crate::types::LogRecord).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A required field was empty.
    #[error("missing required field: {0}")]
    Empty(&'static str),

    /// A field contained a line break.
    #[error("field {0} must not contain a newline")]
    ContainsNewline(&'static str),

    /// A field ended in `\r`, which the reader strips as a line ending.
    #[error("field {0} must not end with a carriage return")]
    TrailingCarriageReturn(&'static str),

    /// A bracketed field contained one of the line format separators.
    #[error("field {field} must not contain {separator:?}")]
    ContainsSeparator {
        /// Offending field.
        field: &'static str,
        /// Separator that was found.
        separator: &'static str,
    },

    /// The application id cannot be used as a single directory name.
    #[error("application id {0:?} is not a valid directory name")]
    UnsafeApplicationId(String),
}

/// Reasons a stored line could not be decoded.
///
/// These never escape the query reader: undecodable lines are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// No `": "` between the metadata prefix and the message.
    #[error("missing message separator")]
    MissingMessageSeparator,

    /// No `"] ["` between the timestamp and the level.
    #[error("missing level separator")]
    MissingLevelSeparator,
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
