//! # claw-applog
//!
//! Partitioned application log storage.
//!
//! Applications push log records which are appended as text lines to one
//! file per application per local calendar day:
//!
//! ```text
//! <root>/<application_id>/<YYYY-MM-DD>.log
//! [<timestamp>] [<log_level>]: <log_message>
//! ```
//!
//! This crate provides:
//!
//! - [`LogRecord`]: One log line with its owning application
//! - [`IngestWriter`]: Appends a record to today's partition
//! - [`QueryReader`]: Scans partitions with a level filter and limit
//! - [`PartitionedLogStore`]: Writer and reader over one root
//! - [`LogStoreBackend`]: Abstract trait for log backends
//! - [`codec`]: The line format
//!
//! ## Example
//!
//! ```rust,no_run
//! use claw_applog::{LogQuery, LogRecord, LogStoreBackend, PartitionedLogStore, StoreConfig};
//!
//! let store = PartitionedLogStore::new(StoreConfig::new("logs"));
//! store.append(&LogRecord::new("svc1", "INFO", "2024-01-01T00:00:00Z", "started"))?;
//!
//! let records = store.query(&LogQuery::new("svc1", "INFO").with_limit(10))?;
//! assert_eq!(records[0].message, "started");
//! # Ok::<(), claw_applog::StoreError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod error;
pub mod partition;
pub mod reader;
pub mod store;
pub mod traits;
pub mod types;
pub mod writer;

// Re-export main types
pub use codec::{decode_line, encode_line, DecodedLine};
pub use error::{DecodeError, RecordError, Result, StoreError};
pub use partition::{application_dir, Clock, FixedClock, LocalClock, PartitionKey};
pub use reader::QueryReader;
pub use store::{PartitionedLogStore, StoreConfig};
pub use traits::LogStoreBackend;
pub use types::{
    parse_limit, validate_application_id, LevelMatch, LogQuery, LogRecord, MissingApplication,
    DEFAULT_QUERY_LIMIT,
};
pub use writer::IngestWriter;
