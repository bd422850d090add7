//! Severity levels that gate which records reach the writers and which
//! files of a multi-file writer a record lands in.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so the logger can compare a record's level against the configured minimum,
/// and so the multi-file writer can walk every level up to the record's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Development-time diagnostics that are too noisy for normal operation.
    #[default]
    Debug = 0,
    /// Normal operational milestones.
    Info = 1,
    /// Non-fatal anomalies that may need attention.
    Warn = 2,
    /// Failures that prevent an operation from completing.
    Error = 3,
    /// Logged, then raised as a panic carrying the rendered record.
    Panic = 4,
    /// Logged, then the logger is closed and the process exits.
    Fatal = 5,
}

impl Level {
    /// Lowest level, the start of every cumulative walk.
    pub const MIN: Self = Self::Debug;
    /// Highest level, the last file of a multi-file writer.
    pub const MAX: Self = Self::Fatal;

    /// Uppercase because both the `level` field of encoded records and the
    /// multi-file names (`ERROR.20240101.log`) use this exact spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Panic => "PANIC",
            Self::Fatal => "FATAL",
        }
    }

    /// Every level in ascending order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Panic,
            Self::Fatal,
        ]
    }

    /// Position in [`Level::all`], used to index per-level file tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Levels from `self` up to and including [`Level::MAX`].
    pub fn and_above(self) -> impl Iterator<Item = Self> {
        Self::all().into_iter().skip(self.index())
    }

    /// Lenient parse for config values and environment strings: case-insensitive,
    /// surrounding whitespace ignored, anything unrecognised becomes `Info`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        s.parse().unwrap_or(Self::Info)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers that want strictness can tell "unknown level" apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        Self::all()
            .into_iter()
            .find(|level| level.as_str() == wanted)
            .ok_or_else(|| ParseLevelError(s.to_string()))
    }
}
