//! Query reader: scans an application's partitions for matching lines.
//!
//! Partitions are visited in file-name order, which for `YYYY-MM-DD.log`
//! names is chronological, and each file is read front to back. Matching
//! records are collected across all files before the limit is applied, so
//! the earliest records win.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::codec::decode_line;
use crate::error::{Result, StoreError};
use crate::partition::application_dir;
use crate::types::{validate_application_id, LevelMatch, LogQuery, LogRecord, MissingApplication};

/// Reads records back out of the partitioned store.
#[derive(Debug, Clone)]
pub struct QueryReader {
    root: PathBuf,
    missing_application: MissingApplication,
}

impl QueryReader {
    /// Creates a reader over `root` that fails on unknown applications.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            missing_application: MissingApplication::Fail,
        }
    }

    /// Sets the policy for applications without a directory.
    #[must_use]
    pub const fn with_missing_application(mut self, policy: MissingApplication) -> Self {
        self.missing_application = policy;
        self
    }

    /// Returns the store root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs `query` against the store.
    ///
    /// # Errors
    ///
    /// Any listing, open or read failure aborts the whole query; no partial
    /// result is returned. With [`MissingApplication::Fail`] an application
    /// that never logged anything is reported the same way.
    pub fn query(&self, query: &LogQuery) -> Result<Vec<LogRecord>> {
        validate_application_id(&query.application_id)?;

        let dir = application_dir(&self.root, &query.application_id);
        let partitions = match list_partitions(&dir) {
            Ok(partitions) => partitions,
            Err(err)
                if err.is_not_found()
                    && self.missing_application == MissingApplication::Empty =>
            {
                debug!(application_id = %query.application_id, "no partitions for application");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };

        let mut records = Vec::new();
        for path in &partitions {
            scan_partition(path, query, &mut records)?;
        }

        let matched = records.len();
        records.truncate(query.limit);
        debug!(
            application_id = %query.application_id,
            level = %query.level,
            partitions = partitions.len(),
            matched,
            returned = records.len(),
            "query complete"
        );
        Ok(records)
    }
}

/// Lists the non-directory entries of `dir`, sorted by file name.
fn list_partitions(dir: &Path) -> Result<Vec<PathBuf>> {
    let list_err = |source| StoreError::ListDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut partitions = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_err)? {
        let entry = entry.map_err(list_err)?;
        let file_type = entry.file_type().map_err(list_err)?;
        if file_type.is_dir() {
            continue;
        }
        partitions.push(entry.path());
    }
    partitions.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(partitions)
}

/// Appends every matching, decodable line of `path` to `records`.
fn scan_partition(path: &Path, query: &LogQuery, records: &mut Vec<LogRecord>) -> Result<()> {
    let file = File::open(path).map_err(|source| StoreError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| StoreError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }

        let raw = String::from_utf8_lossy(&buf);
        let line: &str = &raw;
        let line = line.strip_suffix('\n').unwrap_or(line);
        let line = line.strip_suffix('\r').unwrap_or(line);

        if let Some(record) = select_line(line, query) {
            records.push(record);
        }
    }
    Ok(())
}

fn select_line(line: &str, query: &LogQuery) -> Option<LogRecord> {
    match query.mode {
        LevelMatch::Contains => {
            if !line.contains(query.level.as_str()) {
                return None;
            }
            decode_selected(line, &query.application_id)
        }
        LevelMatch::Exact => decode_selected(line, &query.application_id)
            .filter(|record| record.level == query.level),
    }
}

/// Decodes a selected line, dropping it if it does not have the stored
/// shape. Undecodable lines are never an error.
fn decode_selected(line: &str, application_id: &str) -> Option<LogRecord> {
    match decode_line(line) {
        Ok(decoded) => Some(decoded.into_record(application_id)),
        Err(reason) => {
            trace!(%application_id, %reason, "dropping undecodable line");
            None
        }
    }
}
