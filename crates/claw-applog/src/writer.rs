//! Ingest writer: appends one record to its daily partition.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::codec::encode_line;
use crate::error::{Result, StoreError};
use crate::partition::{application_dir, Clock, LocalClock, PartitionKey};
use crate::types::LogRecord;

/// Appends encoded records to `<root>/<application_id>/<today>.log`.
///
/// The writer holds no file handles between calls. Each append opens the
/// partition in append mode and issues a single write of the full line.
#[derive(Clone)]
pub struct IngestWriter {
    root: PathBuf,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for IngestWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IngestWriter")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl IngestWriter {
    /// Creates a writer using the local wall clock.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_clock(root, Arc::new(LocalClock))
    }

    /// Creates a writer that takes the partition day from `clock`.
    #[must_use]
    pub fn with_clock(root: impl Into<PathBuf>, clock: Arc<dyn Clock>) -> Self {
        Self {
            root: root.into(),
            clock,
        }
    }

    /// Returns the store root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Appends `record` to today's partition.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidRecord`] if the record cannot be stored
    /// as one line, or an I/O variant if the directory or file cannot be
    /// created, opened or written.
    pub fn append(&self, record: &LogRecord) -> Result<()> {
        self.append_on(record, self.clock.today())
    }

    /// Appends `record` to the partition of `date`.
    ///
    /// # Errors
    ///
    /// Same as [`IngestWriter::append`].
    pub fn append_on(&self, record: &LogRecord, date: NaiveDate) -> Result<()> {
        record.validate()?;

        let dir = application_dir(&self.root, &record.application_id);
        fs::create_dir_all(&dir).map_err(|source| StoreError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let path = PartitionKey::new(&record.application_id, date).path(&self.root);
        let mut line = encode_line(record);
        line.push('\n');

        if let Err(err) = append_line(&path, &line) {
            warn!(
                application_id = %record.application_id,
                error = %err,
                "failed to append log record"
            );
            return Err(err);
        }

        debug!(
            application_id = %record.application_id,
            path = %path.display(),
            "appended log record"
        );
        Ok(())
    }
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    file.write_all(line.as_bytes())
        .map_err(|source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        })
}
