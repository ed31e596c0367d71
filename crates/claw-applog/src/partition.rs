//! Partition path resolution.
//!
//! A partition is one file per application per local calendar day:
//! `<root>/<application_id>/<YYYY-MM-DD>.log`. Paths are always derived from
//! the inputs; nothing here caches handles or touches the filesystem.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

/// `strftime` format of a partition file stem.
pub const PARTITION_DATE_FORMAT: &str = "%Y-%m-%d";

/// Extension of partition files.
pub const PARTITION_EXTENSION: &str = "log";

/// Source of the current calendar day for new writes.
pub trait Clock: Send + Sync {
    /// Returns the day new records are written under.
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Identifies one partition file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartitionKey<'a> {
    /// Owning application.
    pub application_id: &'a str,
    /// Calendar day of the partition.
    pub date: NaiveDate,
}

impl<'a> PartitionKey<'a> {
    /// Creates a key for the given application and day.
    #[must_use]
    pub const fn new(application_id: &'a str, date: NaiveDate) -> Self {
        Self {
            application_id,
            date,
        }
    }

    /// Returns the partition file name, e.g. `2024-01-01.log`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!(
            "{}.{PARTITION_EXTENSION}",
            self.date.format(PARTITION_DATE_FORMAT)
        )
    }

    /// Resolves the partition file under `root`.
    #[must_use]
    pub fn path(&self, root: &Path) -> PathBuf {
        application_dir(root, self.application_id).join(self.file_name())
    }
}

/// Resolves the directory holding every partition of one application.
#[must_use]
pub fn application_dir(root: &Path, application_id: &str) -> PathBuf {
    root.join(application_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn file_name_is_zero_padded_iso_date() {
        let key = PartitionKey::new("svc1", day(2024, 3, 7));
        assert_eq!(key.file_name(), "2024-03-07.log");
    }

    #[test]
    fn path_layout() {
        let key = PartitionKey::new("svc1", day(2024, 1, 1));
        assert_eq!(
            key.path(Path::new("logs")),
            PathBuf::from("logs/svc1/2024-01-01.log")
        );
        assert_eq!(
            application_dir(Path::new("/var/applog"), "svc1"),
            PathBuf::from("/var/applog/svc1")
        );
    }

    #[test]
    fn file_names_sort_chronologically() {
        let mut names: Vec<String> = [day(2024, 10, 1), day(2023, 12, 31), day(2024, 2, 9)]
            .into_iter()
            .map(|d| PartitionKey::new("a", d).file_name())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec!["2023-12-31.log", "2024-02-09.log", "2024-10-01.log"]
        );
    }

    #[test]
    fn fixed_clock_returns_pinned_day() {
        let clock = FixedClock(day(2024, 6, 15));
        assert_eq!(clock.today(), day(2024, 6, 15));
    }

    #[test]
    fn local_clock_matches_chrono_local() {
        let before = Local::now().date_naive();
        let today = LocalClock.today();
        let after = Local::now().date_naive();
        assert!(today == before || today == after);
    }
}
