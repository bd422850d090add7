//! Retention for rotated log files.
//!
//! Rotation creates one file per day (per level, in multi-file mode); without
//! cleanup the log directory grows until the disk fills. Files are dated by
//! name rather than by modification time, so copying a directory around does
//! not change what gets expired.

mod names;
mod result;

pub use names::{DATE_FORMAT, multi_file_date, multi_file_name, single_file_date, single_file_name};
pub use result::CleanupResult;

use crate::internal;
use chrono::{Days, NaiveDate};
use std::fs;
use std::path::Path;

/// Extracts the date embedded in a log file name, `None` for foreign files.
pub type DateParser = fn(&str) -> Option<NaiveDate>;

/// Deletes files in `dir` whose embedded date is strictly older than
/// `today - retention_days`. Sub-directories and names `parse_date` rejects
/// are skipped. A retention of zero or less disables cleanup entirely.
///
/// # Errors
/// Only the directory listing itself; per-file failures are collected in
/// [`CleanupResult::failed`].
pub fn clean_expired(
    dir: &Path,
    today: NaiveDate,
    retention_days: i64,
    parse_date: DateParser,
) -> Result<CleanupResult, crate::Error> {
    let mut result = CleanupResult::default();
    let Some(cutoff) = cutoff(today, retention_days) else {
        return Ok(result);
    };
    internal::debug(
        "CLEANUP",
        &format!("Expiring files dated before {cutoff} in {}", dir.display()),
    );

    for entry in fs::read_dir(dir)? {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(date) = parse_date(name) else {
            continue;
        };
        if date >= cutoff {
            continue;
        }

        let size = entry.metadata().map_or(0, |m| m.len());
        match fs::remove_file(&path) {
            Ok(()) => {
                internal::debug("CLEANUP", &format!("Deleted: {}", path.display()));
                result.deleted.push(path.display().to_string());
                result.freed += size;
            }
            Err(e) => {
                result.failed.push((path.display().to_string(), e.to_string()));
            }
        }
    }

    if !result.deleted.is_empty() {
        internal::info(
            "CLEANUP",
            &format!(
                "Cleanup complete: {} files, {} bytes freed",
                result.count(),
                result.freed
            ),
        );
    }
    Ok(result)
}

/// `today - days`, or `None` when retention is disabled or the date underflows.
fn cutoff(today: NaiveDate, retention_days: i64) -> Option<NaiveDate> {
    let days = u64::try_from(retention_days).ok().filter(|d| *d > 0)?;
    today.checked_sub_days(Days::new(days))
}
