//! End-to-end behavior of the partitioned store through its public API.

use std::fs;
use std::sync::Arc;

use chrono::NaiveDate;
use claw_applog::{
    FixedClock, LevelMatch, LogQuery, LogRecord, LogStoreBackend, PartitionedLogStore,
    StoreConfig, StoreError,
};
use tempfile::TempDir;

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn store_on(dir: &TempDir, date: NaiveDate) -> PartitionedLogStore {
    PartitionedLogStore::with_clock(StoreConfig::new(dir.path()), Arc::new(FixedClock(date)))
}

#[test]
fn documented_example() {
    let dir = TempDir::new().expect("create temp dir");
    let store = store_on(&dir, day(2024, 5, 20));

    store
        .append(&LogRecord::new(
            "svc1",
            "INFO",
            "2024-01-01T00:00:00Z",
            "started",
        ))
        .expect("append");

    let content = fs::read_to_string(dir.path().join("svc1").join("2024-05-20.log"))
        .expect("read partition");
    assert_eq!(content, "[2024-01-01T00:00:00Z] [INFO]: started\n");

    let records = store.query(&LogQuery::new("svc1", "INFO")).expect("query");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].level, "INFO");
    assert_eq!(records[0].timestamp, "2024-01-01T00:00:00Z");
    assert_eq!(records[0].message, "started");
}

#[test]
fn partitions_written_by_different_days_are_both_read() {
    let dir = TempDir::new().expect("create temp dir");

    store_on(&dir, day(2024, 2, 28))
        .append(&LogRecord::new("billing", "ERROR", "a", "first"))
        .expect("append");
    store_on(&dir, day(2024, 2, 29))
        .append(&LogRecord::new("billing", "ERROR", "b", "second"))
        .expect("append");

    let mut names: Vec<String> = fs::read_dir(dir.path().join("billing"))
        .expect("list")
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["2024-02-28.log", "2024-02-29.log"]);

    let records = store_on(&dir, day(2024, 3, 1))
        .query(&LogQuery::new("billing", "ERROR"))
        .expect("query");
    let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "second"]);
}

#[test]
fn loose_and_exact_level_matching() {
    let dir = TempDir::new().expect("create temp dir");
    let store = store_on(&dir, day(2024, 1, 1));

    store
        .append(&LogRecord::new("svc1", "ERROR", "t", "boom"))
        .expect("append");
    store
        .append(&LogRecord::new("svc1", "INFO", "t", "saw a WARN upstream"))
        .expect("append");

    let loose = store.query(&LogQuery::new("svc1", "ERR")).expect("query");
    assert_eq!(loose.len(), 1);
    assert_eq!(loose[0].level, "ERROR");

    let from_message = store.query(&LogQuery::new("svc1", "WARN")).expect("query");
    assert_eq!(from_message.len(), 1);
    assert_eq!(from_message[0].level, "INFO");

    let exact = store
        .query(&LogQuery::new("svc1", "ERR").with_mode(LevelMatch::Exact))
        .expect("query");
    assert!(exact.is_empty());
}

#[test]
fn hand_edited_garbage_is_skipped() {
    let dir = TempDir::new().expect("create temp dir");
    let store = store_on(&dir, day(2024, 1, 1));

    store
        .append(&LogRecord::new("svc1", "INFO", "t1", "before"))
        .expect("append");

    let path = dir.path().join("svc1/2024-01-01.log");
    let mut content = fs::read_to_string(&path).expect("read");
    content.push_str("INFO: inserted by hand without brackets\n");
    fs::write(&path, content).expect("write");

    store
        .append(&LogRecord::new("svc1", "INFO", "t2", "after"))
        .expect("append");

    let records = store.query(&LogQuery::new("svc1", "INFO")).expect("query");
    let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(messages, vec!["before", "after"]);
}

#[test]
fn unknown_application_is_an_error_not_an_empty_result() {
    let dir = TempDir::new().expect("create temp dir");
    let store = store_on(&dir, day(2024, 1, 1));

    store
        .append(&LogRecord::new("svc1", "INFO", "t", "m"))
        .expect("append");

    let err = store
        .query(&LogQuery::new("svc2", "INFO"))
        .expect_err("no directory for svc2");
    assert!(err.is_not_found());
    assert!(matches!(err, StoreError::ListDir { .. }));

    let empty = store.query(&LogQuery::new("svc1", "TRACE")).expect("query");
    assert!(empty.is_empty());
}
