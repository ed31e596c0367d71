//! Traits for log storage backends.
//!
//! The HTTP layer talks to the store through [`LogStoreBackend`] so it can be
//! exercised against substitute backends.

use crate::error::Result;
use crate::types::{LogQuery, LogRecord};

/// A store that accepts records and answers level queries.
pub trait LogStoreBackend: Send + Sync {
    /// Durably appends one record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be stored.
    fn append(&self, record: &LogRecord) -> Result<()>;

    /// Returns the records matching `query`, oldest first, at most
    /// `query.limit` of them.
    ///
    /// # Errors
    ///
    /// Returns an error if any partition cannot be listed or read.
    fn query(&self, query: &LogQuery) -> Result<Vec<LogRecord>>;
}
