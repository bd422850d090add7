//! Tests for records, the entry guard and the pools.

use cascadelog::record::Reset;
use cascadelog::{Field, Level, Logger, Pool, Record, Value, fields};
use chrono::Local;
use std::time::Duration;

fn quiet_logger() -> Logger {
    Logger::builder().flush_interval(Duration::ZERO).build()
}

#[test]
fn released_record_comes_back_empty() {
    let pool: Pool<Record> = Pool::new(4);
    let mut record = pool.acquire();
    record.level = Level::Error;
    record.time = Local::now();
    record.position = "a/b.rs:1".to_string();
    record.prefix = "[x] ".to_string();
    record.format = "%d".to_string();
    record.args.push(1.into());
    record.push_field("k", "v");
    pool.release(record);
    assert_eq!(pool.idle(), 1);

    let reused = pool.acquire();
    assert_eq!(reused, Record::default());
    assert!(reused.args.is_empty());
    assert!(reused.fields.is_empty());
    assert_eq!(pool.idle(), 0);
}

#[test]
fn pool_keeps_at_most_capacity() {
    let pool: Pool<Vec<u8>> = Pool::new(1);
    pool.release(b"one".to_vec());
    pool.release(b"two".to_vec());
    assert_eq!(pool.idle(), 1);
    assert!(pool.acquire().is_empty());
    assert!(pool.acquire().is_empty());
}

#[test]
fn reset_keeps_nothing() {
    let mut record = Record {
        level: Level::Fatal,
        fields: vec![Field::new("a", 1)],
        ..Record::default()
    };
    record.reset();
    assert_eq!(record, Record::default());
}

#[test]
fn with_fields_pairs_keys_and_values() {
    let logger = quiet_logger();
    let entry = logger.with_fields(fields!["user", "bob", "attempts", 3]);
    assert_eq!(
        entry.fields(),
        [Field::new("user", "bob"), Field::new("attempts", 3)]
    );
}

#[test]
fn with_fields_drops_trailing_key() {
    let logger = quiet_logger();
    let entry = logger.with_fields(fields!["a", 1, "dangling"]);
    assert_eq!(entry.fields(), [Field::new("a", 1)]);
}

#[test]
fn with_fields_skips_non_string_keys() {
    let logger = quiet_logger();
    let entry = logger.with_fields(fields![1, "lost", "b", 2]);
    assert_eq!(entry.fields(), [Field::new("b", 2)]);
}

#[test]
fn with_fields_accepts_prebuilt_fields() {
    let logger = quiet_logger();
    let entry = logger
        .with_field("first", true)
        .with_fields(fields![Field::new("f", 1.5), "k", Field::new("ignored", 7)]);
    assert_eq!(
        entry.fields(),
        [
            Field::new("first", true),
            Field::new("f", 1.5),
            Field::new("k", Value::Int(7)),
        ]
    );
}

#[test]
fn dropped_entry_returns_record_to_pool() {
    let logger = quiet_logger();
    assert_eq!(logger.idle_records(), 0);
    drop(logger.with_field("k", "v"));
    assert_eq!(logger.idle_records(), 1);

    let entry = logger.entry();
    assert!(entry.fields().is_empty());
    assert_eq!(logger.idle_records(), 0);
}
