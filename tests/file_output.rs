//! Tests for the rotating file writers.

use cascadelog::cleanup::{multi_file_name, single_file_name};
use cascadelog::{
    Clock, FileOptions, Level, Logger, MultiFileWriter, Routing, SingleFileWriter, TextEncoder,
    Writer,
};
use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Clock the test moves by hand.
struct ManualClock(Mutex<DateTime<Local>>);

impl ManualClock {
    fn at(date: NaiveDate) -> Arc<Self> {
        Arc::new(Self(Mutex::new(noon(date))))
    }

    fn set(&self, date: NaiveDate) {
        *self.0.lock().unwrap() = noon(date);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        *self.0.lock().unwrap()
    }
}

fn noon(date: NaiveDate) -> DateTime<Local> {
    Local
        .from_local_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
        .earliest()
        .unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).unwrap()
}

fn multi(
    dir: &TempDir,
    min: Level,
    routing: Routing,
    clock: Arc<ManualClock>,
) -> MultiFileWriter {
    let opts = FileOptions::new().dir(dir.path()).retention_days(0);
    MultiFileWriter::with_clock(min, opts, routing, clock).unwrap()
}

#[test]
fn cumulative_write_lands_in_every_lower_file() {
    let dir = TempDir::new().unwrap();
    let writer = multi(&dir, Level::Debug, Routing::Cumulative, ManualClock::at(day(31)));
    writer.write(Level::Error, b"boom\n").unwrap();
    writer.flush().unwrap();

    let touched: Vec<Level> = Level::all()
        .into_iter()
        .filter(|l| !read(dir.path(), &multi_file_name(*l, day(31))).is_empty())
        .collect();
    assert_eq!(touched, [Level::Debug, Level::Info, Level::Warn, Level::Error]);
    for level in touched {
        assert_eq!(read(dir.path(), &multi_file_name(level, day(31))), "boom\n");
    }
}

#[test]
fn multi_opens_one_file_per_level_from_minimum() {
    let dir = TempDir::new().unwrap();
    let writer = multi(&dir, Level::Warn, Routing::Cumulative, ManualClock::at(day(31)));
    let count = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(count, 4);
    assert!(writer.current_path(Level::Info).is_none());
    assert_eq!(
        writer.current_path(Level::Fatal).unwrap(),
        dir.path().join("FATAL.20240131.log")
    );

    writer.write(Level::Info, b"below\n").unwrap();
    writer.write(Level::Warn, b"warn\n").unwrap();
    writer.close().unwrap();
    assert_eq!(read(dir.path(), "WARN.20240131.log"), "warn\n");
    assert_eq!(read(dir.path(), "ERROR.20240131.log"), "");
}

#[test]
fn exclusive_routing_writes_only_own_level() {
    let dir = TempDir::new().unwrap();
    let writer = multi(&dir, Level::Debug, Routing::Exclusive, ManualClock::at(day(31)));
    writer.write(Level::Error, b"e\n").unwrap();
    writer.write(Level::Debug, b"d\n").unwrap();
    writer.close().unwrap();

    assert_eq!(read(dir.path(), "ERROR.20240131.log"), "e\n");
    assert_eq!(read(dir.path(), "DEBUG.20240131.log"), "d\n");
    assert_eq!(read(dir.path(), "WARN.20240131.log"), "");
}

#[test]
fn multi_rotates_when_the_date_changes() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::at(day(30));
    let writer = multi(&dir, Level::Error, Routing::Cumulative, clock.clone());
    writer.write(Level::Error, b"first\n").unwrap();

    clock.set(day(31));
    writer.write(Level::Fatal, b"second\n").unwrap();
    writer.close().unwrap();

    assert_eq!(read(dir.path(), "ERROR.20240130.log"), "first\n");
    assert_eq!(read(dir.path(), "ERROR.20240131.log"), "second\n");
    assert_eq!(read(dir.path(), "FATAL.20240131.log"), "second\n");
}

#[test]
fn single_file_takes_every_level() {
    let dir = TempDir::new().unwrap();
    let clock = ManualClock::at(day(31));
    let opts = FileOptions::new().dir(dir.path());
    let writer = SingleFileWriter::with_clock(opts, clock.clone()).unwrap();
    assert_eq!(writer.current_path().unwrap(), dir.path().join("20240131.log"));

    writer.write(Level::Debug, b"a\n").unwrap();
    writer.write(Level::Fatal, b"b\n").unwrap();
    clock.set(day(30));
    writer.write(Level::Info, b"c\n").unwrap();
    writer.close().unwrap();

    assert_eq!(read(dir.path(), &single_file_name(day(31))), "a\nb\n");
    assert_eq!(read(dir.path(), "20240130.log"), "c\n");
}

#[test]
fn close_twice_is_a_no_op() {
    let dir = TempDir::new().unwrap();
    let writer = multi(&dir, Level::Debug, Routing::Cumulative, ManualClock::at(day(31)));
    writer.write(Level::Info, b"kept\n").unwrap();
    writer.close().unwrap();
    writer.close().unwrap();
    writer.write(Level::Info, b"discarded\n").unwrap();
    writer.flush().unwrap();
    assert_eq!(read(dir.path(), "INFO.20240131.log"), "kept\n");

    let opts = FileOptions::new().dir(dir.path().join("single"));
    let single = SingleFileWriter::with_clock(opts, ManualClock::at(day(31))).unwrap();
    single.close().unwrap();
    single.close().unwrap();
}

#[test]
fn buffered_until_flush() {
    let dir = TempDir::new().unwrap();
    let opts = FileOptions::new().dir(dir.path()).buffer_size(1024);
    let writer = SingleFileWriter::with_clock(opts, ManualClock::at(day(31))).unwrap();
    writer.write(Level::Info, b"pending\n").unwrap();
    assert_eq!(read(dir.path(), "20240131.log"), "");
    writer.flush().unwrap();
    assert_eq!(read(dir.path(), "20240131.log"), "pending\n");
}

#[test]
fn creates_nested_directories() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let opts = FileOptions::new().dir(&nested);
    SingleFileWriter::with_clock(opts, ManualClock::at(day(31))).unwrap();
    assert!(nested.join("20240131.log").is_file());
}

#[test]
fn unusable_directory_fails_construction() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("not-a-dir");
    fs::write(&blocker, "x").unwrap();

    let opts = FileOptions::new().dir(&blocker);
    assert!(SingleFileWriter::with_clock(opts.clone(), ManualClock::at(day(31))).is_err());
    assert!(MultiFileWriter::new(Level::Info, opts).is_err());
}

#[cfg(unix)]
#[test]
fn non_utf8_home_directory_is_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let opts = FileOptions::new().dir(Path::new(OsStr::from_bytes(b"~/logs-\xff")));
    let single = SingleFileWriter::new(opts.clone()).unwrap_err();
    assert!(matches!(single, cascadelog::Error::InvalidPath(_)), "{single}");
    let multi = MultiFileWriter::new(Level::Info, opts).unwrap_err();
    assert!(matches!(multi, cascadelog::Error::InvalidPath(_)), "{multi}");
}

#[test]
fn rotation_expires_old_files() {
    let dir = TempDir::new().unwrap();
    let today = day(31);
    let old = today.checked_sub_days(Days::new(20)).unwrap();
    let recent = today.checked_sub_days(Days::new(5)).unwrap();
    fs::write(dir.path().join(multi_file_name(Level::Info, old)), "old").unwrap();
    fs::write(dir.path().join(multi_file_name(Level::Info, recent)), "recent").unwrap();
    fs::write(dir.path().join("notes.txt"), "keep").unwrap();

    let opts = FileOptions::new().dir(dir.path()).retention_days(14);
    let writer =
        MultiFileWriter::with_clock(Level::Info, opts, Routing::Cumulative, ManualClock::at(today))
            .unwrap();

    assert!(!dir.path().join(multi_file_name(Level::Info, old)).exists());
    assert!(dir.path().join(multi_file_name(Level::Info, recent)).exists());
    assert!(dir.path().join("notes.txt").exists());
    writer.close().unwrap();
}

#[test]
fn logger_builder_wires_file_writer() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::builder()
        .level(Level::Info)
        .flush_interval(Duration::ZERO)
        .encoder(TextEncoder::default())
        .file()
        .dir(dir.path())
        .done()
        .unwrap()
        .build();
    assert_eq!(logger.writer_count(), 1);

    logger.with_field("disk", "sda").error("failing");
    logger.close();

    let today = Local::now().date_naive();
    let info = read(dir.path(), &multi_file_name(Level::Info, today));
    assert!(info.contains(" msg=failing disk=sda\n"));
    assert_eq!(info, read(dir.path(), &multi_file_name(Level::Error, today)));
    assert!(!dir.path().join(multi_file_name(Level::Debug, today)).exists());
}

#[test]
fn logger_builder_single_mode() {
    let dir = TempDir::new().unwrap();
    let logger = Logger::builder()
        .flush_interval(Duration::ZERO)
        .file()
        .single()
        .dir(dir.path())
        .clock(ManualClock::at(day(31)))
        .done()
        .unwrap()
        .build();
    logger.debug("one");
    logger.sync().unwrap();
    assert!(read(dir.path(), "20240131.log").contains(" msg=one\n"));
}

#[test]
fn logger_builder_reports_directory_errors() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("file");
    fs::write(&blocker, "x").unwrap();
    assert!(Logger::builder().file().dir(&blocker).done().is_err());
}
