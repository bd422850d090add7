//! Tests for retention cleanup.

use cascadelog::cleanup::{multi_file_date, multi_file_name, single_file_date, single_file_name};
use cascadelog::{Level, clean_expired};
use chrono::{Days, NaiveDate};
use std::fs;
use tempfile::tempdir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
}

fn days_ago(n: u64) -> NaiveDate {
    today().checked_sub_days(Days::new(n)).unwrap()
}

#[test]
fn names_round_trip_through_parsers() {
    assert_eq!(single_file_name(today()), "20240301.log");
    assert_eq!(multi_file_name(Level::Warn, today()), "WARN.20240301.log");
    assert_eq!(single_file_date("20240301.log"), Some(today()));
    assert_eq!(multi_file_date("PANIC.20240301.log"), Some(today()));
}

#[test]
fn foreign_names_are_rejected() {
    assert_eq!(single_file_date("2024031.log"), None);
    assert_eq!(single_file_date("20241301.log"), None);
    assert_eq!(single_file_date("INFO.20240301.log"), None);
    assert_eq!(multi_file_date("TRACE.20240301.log"), None);
    assert_eq!(multi_file_date("info.20240301.log"), None);
    assert_eq!(multi_file_date("20240301.log"), None);
}

#[test]
fn cleanup_empty_dir() {
    let dir = tempdir().unwrap();
    let result = clean_expired(dir.path(), today(), 14, single_file_date).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.count(), 0);
}

#[test]
fn deletes_only_files_older_than_cutoff() {
    let dir = tempdir().unwrap();
    let old = dir.path().join(single_file_name(days_ago(20)));
    let edge = dir.path().join(single_file_name(days_ago(14)));
    let recent = dir.path().join(single_file_name(days_ago(5)));
    fs::write(&old, "0123456789").unwrap();
    fs::write(&edge, "edge").unwrap();
    fs::write(&recent, "recent").unwrap();

    let result = clean_expired(dir.path(), today(), 14, single_file_date).unwrap();
    assert_eq!(result.count(), 1);
    assert_eq!(result.freed, 10);
    assert!(result.failed.is_empty());
    assert!(!old.exists());
    assert!(edge.exists());
    assert!(recent.exists());
}

#[test]
fn skips_directories_and_foreign_files() {
    let dir = tempdir().unwrap();
    let ancient = days_ago(400);
    fs::create_dir(dir.path().join(single_file_name(ancient))).unwrap();
    fs::write(dir.path().join("readme.log"), "x").unwrap();
    fs::write(dir.path().join(multi_file_name(Level::Info, ancient)), "x").unwrap();

    let result = clean_expired(dir.path(), today(), 14, single_file_date).unwrap();
    assert!(result.is_empty());
    assert!(dir.path().join(single_file_name(ancient)).is_dir());
    assert!(dir.path().join("readme.log").exists());

    let result = clean_expired(dir.path(), today(), 14, multi_file_date).unwrap();
    assert_eq!(result.count(), 1);
    assert!(!dir.path().join(multi_file_name(Level::Info, ancient)).exists());
}

#[test]
fn non_positive_retention_disables_cleanup() {
    let dir = tempdir().unwrap();
    let old = dir.path().join(single_file_name(days_ago(100)));
    fs::write(&old, "x").unwrap();

    for retention in [0, -1, -14] {
        let result = clean_expired(dir.path(), today(), retention, single_file_date).unwrap();
        assert!(result.is_empty());
    }
    assert!(old.exists());
}

#[test]
fn missing_directory_is_an_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert!(clean_expired(&missing, today(), 14, single_file_date).is_err());
}
