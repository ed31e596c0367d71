//! Line encoding for stored log records.
//!
//! Each record is stored as one line:
//!
//! ```text
//! [<timestamp>] [<log_level>]: <log_message>
//! ```
//!
//! Decoding splits once at the first `": "` (everything after it is the
//! message), then splits the prefix once at the first `"] ["` and strips the
//! surrounding brackets from timestamp and level.

use crate::error::DecodeError;
use crate::types::LogRecord;

/// Separates the bracketed metadata from the message.
pub const MESSAGE_SEPARATOR: &str = ": ";

/// Separates the bracketed timestamp from the bracketed level.
pub const LEVEL_SEPARATOR: &str = "] [";

const BRACKETS: [char; 2] = ['[', ']'];

/// Encodes a record as a single line, without the trailing newline.
#[must_use]
pub fn encode_line(record: &LogRecord) -> String {
    format!(
        "[{}] [{}]{MESSAGE_SEPARATOR}{}",
        record.timestamp, record.level, record.message
    )
}

/// The fields recovered from one stored line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedLine<'a> {
    /// Timestamp text with brackets removed.
    pub timestamp: &'a str,
    /// Level text with brackets removed.
    pub level: &'a str,
    /// Message text, verbatim.
    pub message: &'a str,
}

impl DecodedLine<'_> {
    /// Converts the decoded fields into a record owned by `application_id`.
    #[must_use]
    pub fn into_record(self, application_id: &str) -> LogRecord {
        LogRecord::new(application_id, self.level, self.timestamp, self.message)
    }
}

/// Decodes one stored line.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the separator that was not found.
pub fn decode_line(line: &str) -> Result<DecodedLine<'_>, DecodeError> {
    let (meta, message) = line
        .split_once(MESSAGE_SEPARATOR)
        .ok_or(DecodeError::MissingMessageSeparator)?;
    let (timestamp, level) = meta
        .split_once(LEVEL_SEPARATOR)
        .ok_or(DecodeError::MissingLevelSeparator)?;

    Ok(DecodedLine {
        timestamp: timestamp.trim_matches(BRACKETS),
        level: level.trim_matches(BRACKETS),
        message,
    })
}
