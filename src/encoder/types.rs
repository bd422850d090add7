//! Per-kind value serialization shared by every record layout.

use crate::fmt::{duration, printf};
use crate::value::{Complex, Opaque, Sequence, Value};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::io::Write as _;
use std::time::Duration;

/// Writes a string value (raw, quoted, escaped, ...).
pub type StringHook = fn(&mut Vec<u8>, &str);

/// Writes a value outside the closed set of kinds.
pub type DefaultHook = fn(&mut Vec<u8>, &Opaque);

/// strftime pattern for `YYYYMMDDhhmmss`.
pub const DEFAULT_TIME_FORMAT: &str = "%Y%m%d%H%M%S";

/// Dispatches a [`Value`] to the routine for its kind.
///
/// Numbers and booleans are written directly. Strings, and the text forms of
/// times and durations, go through the string hook so a layout can quote
/// them. [`Value::Other`] goes through the default hook. Sequences are the
/// concatenation of their encoded elements, with no separator.
#[derive(Debug, Clone)]
pub struct TypeEncoder {
    pub time_format: String,
    pub default: DefaultHook,
    pub string: StringHook,
}

/// Passes a string through untouched.
pub fn raw_string(buf: &mut Vec<u8>, s: &str) {
    buf.extend_from_slice(s.as_bytes());
}

impl TypeEncoder {
    /// A raw-string encoder; an empty `time_format` selects [`DEFAULT_TIME_FORMAT`].
    #[must_use]
    pub fn new(time_format: &str, default: DefaultHook) -> Self {
        let time_format = if time_format.is_empty() {
            DEFAULT_TIME_FORMAT
        } else {
            time_format
        };
        Self {
            time_format: time_format.to_string(),
            default,
            string: raw_string,
        }
    }

    /// Replaces the string hook.
    #[must_use]
    pub fn with_string(mut self, hook: StringHook) -> Self {
        self.string = hook;
        self
    }

    /// Writes `value` into `buf`. Never fails.
    pub fn encode_val(&self, buf: &mut Vec<u8>, value: &Value) {
        match value {
            Value::Int(n) => Self::encode_int(buf, *n),
            Value::Uint(n) => Self::encode_uint(buf, *n),
            Value::Float(n) => Self::encode_float(buf, *n),
            Value::Complex(c) => Self::encode_complex(buf, *c),
            Value::Bool(b) => Self::encode_bool(buf, *b),
            Value::Str(s) => self.encode_string(buf, s),
            Value::Time(t) => self.encode_time(buf, t),
            Value::Duration(d) => self.encode_duration(buf, *d),
            Value::Seq(seq) => self.encode_seq(buf, seq),
            Value::Other(other) => (self.default)(buf, other),
        }
    }

    fn encode_seq(&self, buf: &mut Vec<u8>, seq: &Sequence) {
        match seq {
            Sequence::Int(v) => v.iter().for_each(|n| Self::encode_int(buf, *n)),
            Sequence::Uint(v) => v.iter().for_each(|n| Self::encode_uint(buf, *n)),
            Sequence::Float(v) => v.iter().for_each(|n| Self::encode_float(buf, *n)),
            Sequence::Complex(v) => v.iter().for_each(|c| Self::encode_complex(buf, *c)),
            Sequence::Bool(v) => v.iter().for_each(|b| Self::encode_bool(buf, *b)),
            Sequence::Str(v) => v.iter().for_each(|s| self.encode_string(buf, s)),
            Sequence::Time(v) => v.iter().for_each(|t| self.encode_time(buf, t)),
            Sequence::Duration(v) => v.iter().for_each(|d| self.encode_duration(buf, *d)),
        }
    }

    /// Base-10.
    pub fn encode_int(buf: &mut Vec<u8>, n: i64) {
        let _ = write!(buf, "{n}");
    }

    /// Base-10.
    pub fn encode_uint(buf: &mut Vec<u8>, n: u64) {
        let _ = write!(buf, "{n}");
    }

    /// Fixed notation, four digits after the point.
    pub fn encode_float(buf: &mut Vec<u8>, n: f64) {
        buf.extend_from_slice(printf::fixed(n, 4).as_bytes());
    }

    /// `(re+imi)`.
    pub fn encode_complex(buf: &mut Vec<u8>, c: Complex) {
        let _ = write!(buf, "{c}");
    }

    pub fn encode_bool(buf: &mut Vec<u8>, b: bool) {
        buf.extend_from_slice(if b { b"true" } else { b"false" });
    }

    pub fn encode_string(&self, buf: &mut Vec<u8>, s: &str) {
        (self.string)(buf, s);
    }

    /// Formats with `time_format`; an invalid pattern falls back to RFC 3339.
    pub fn encode_time(&self, buf: &mut Vec<u8>, t: &DateTime<Local>) {
        let mut text = String::new();
        if write!(text, "{}", t.format(&self.time_format)).is_err() {
            text = t.to_rfc3339();
        }
        self.encode_string(buf, &text);
    }

    pub fn encode_duration(&self, buf: &mut Vec<u8>, d: Duration) {
        self.encode_string(buf, &duration::format(d));
    }
}
