//! File naming for rotated logs: `20240131.log` and `ERROR.20240131.log`.

use crate::level::Level;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// strftime pattern of the date embedded in file names.
pub const DATE_FORMAT: &str = "%Y%m%d";

static SINGLE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{8})\.log$").expect("Invalid single-file name regex"));

static MULTI_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:DEBUG|INFO|WARN|ERROR|PANIC|FATAL)\.(\d{8})\.log$")
        .expect("Invalid multi-file name regex")
});

#[must_use]
pub fn single_file_name(date: NaiveDate) -> String {
    format!("{}.log", date.format(DATE_FORMAT))
}

#[must_use]
pub fn multi_file_name(level: Level, date: NaiveDate) -> String {
    format!("{level}.{}.log", date.format(DATE_FORMAT))
}

#[must_use]
pub fn single_file_date(name: &str) -> Option<NaiveDate> {
    capture_date(&SINGLE_NAME, name)
}

#[must_use]
pub fn multi_file_date(name: &str) -> Option<NaiveDate> {
    capture_date(&MULTI_NAME, name)
}

fn capture_date(re: &Regex, name: &str) -> Option<NaiveDate> {
    let digits = re.captures(name)?.get(1)?.as_str();
    NaiveDate::parse_from_str(digits, DATE_FORMAT).ok()
}
