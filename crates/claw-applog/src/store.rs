//! The partitioned log store.
//!
//! [`PartitionedLogStore`] pairs an [`IngestWriter`] and a [`QueryReader`]
//! over the same root directory. The two never talk to each other; the only
//! shared state is the directory tree on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::partition::{Clock, LocalClock};
use crate::reader::QueryReader;
use crate::traits::LogStoreBackend;
use crate::types::{LogQuery, LogRecord, MissingApplication};
use crate::writer::IngestWriter;

/// Configuration for the partitioned log store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding one subdirectory per application.
    #[serde(default = "default_root")]
    pub root: PathBuf,
    /// Query behavior for applications that have never logged.
    #[serde(default)]
    pub missing_application: MissingApplication,
}

fn default_root() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            missing_application: MissingApplication::Fail,
        }
    }
}

impl StoreConfig {
    /// Creates a config rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Sets the missing-application policy.
    #[must_use]
    pub const fn with_missing_application(mut self, policy: MissingApplication) -> Self {
        self.missing_application = policy;
        self
    }
}

/// Directory-per-application, file-per-day log store.
#[derive(Debug, Clone)]
pub struct PartitionedLogStore {
    writer: IngestWriter,
    reader: QueryReader,
}

impl PartitionedLogStore {
    /// Creates a store that partitions writes by the local calendar day.
    ///
    /// Nothing is created on disk until the first append.
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self::with_clock(config, Arc::new(LocalClock))
    }

    /// Creates a store that takes the partition day from `clock`.
    #[must_use]
    pub fn with_clock(config: StoreConfig, clock: Arc<dyn Clock>) -> Self {
        let writer = IngestWriter::with_clock(config.root.clone(), clock);
        let reader =
            QueryReader::new(config.root).with_missing_application(config.missing_application);
        Self { writer, reader }
    }

    /// Returns the store root.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.writer.root()
    }

    /// Returns the ingest side of the store.
    #[must_use]
    pub const fn writer(&self) -> &IngestWriter {
        &self.writer
    }

    /// Returns the query side of the store.
    #[must_use]
    pub const fn reader(&self) -> &QueryReader {
        &self.reader
    }
}

impl LogStoreBackend for PartitionedLogStore {
    fn append(&self, record: &LogRecord) -> Result<()> {
        self.writer.append(record)
    }

    fn query(&self, query: &LogQuery) -> Result<Vec<LogRecord>> {
        self.reader.query(query)
    }
}
