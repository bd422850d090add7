//! Record layouts: how one [`Record`] and its fields become one line of bytes.
//!
//! Both layouts emit the same keys in the same order (`level`, `time`, `pos`,
//! `msg`, then the fields as inserted) and differ in framing and quoting.
//! An encoder keeps no per-call state, so one instance serves any number of
//! concurrent `encode` calls as long as each brings its own buffer.

mod json;
mod text;
mod types;

pub use json::{JsonEncoder, JsonEscape};
pub use text::TextEncoder;
pub use types::{DEFAULT_TIME_FORMAT, DefaultHook, StringHook, TypeEncoder, raw_string};

use crate::fmt::{sprintf, sprintln};
use crate::record::Record;

/// Renders a complete record into a caller-supplied buffer.
pub trait Encoder: Send + Sync {
    /// Appends the encoded record, including its trailing newline, to `buf`.
    ///
    /// # Errors
    /// The built-in layouts never fail; custom encoders may report serialization errors.
    fn encode(&self, buf: &mut Vec<u8>, record: &Record) -> Result<(), crate::Error>;
}

/// Where a logger prefix goes when the record carries a format string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrefixMode {
    /// Prepended to the format before substitution, so `%` in a prefix is a directive.
    #[default]
    IntoFormat,
    /// Prepended to the already-substituted message.
    Literal,
}

/// Builds the `msg` value of a record.
///
/// With a format: substitution per [`PrefixMode`]. Without: the prefix
/// followed by the space-joined arguments, minus one trailing newline.
#[must_use]
pub fn compose_message(record: &Record, mode: PrefixMode) -> String {
    if record.format.is_empty() {
        let mut msg = String::with_capacity(record.prefix.len() + 16);
        msg.push_str(&record.prefix);
        msg.push_str(&sprintln(&record.args));
        if msg.ends_with('\n') {
            msg.pop();
        }
        return msg;
    }

    match mode {
        PrefixMode::IntoFormat if !record.prefix.is_empty() => {
            sprintf(&format!("{}{}", record.prefix, record.format), &record.args)
        }
        PrefixMode::IntoFormat => sprintf(&record.format, &record.args),
        PrefixMode::Literal => {
            let mut msg = record.prefix.clone();
            msg.push_str(&sprintf(&record.format, &record.args));
            msg
        }
    }
}
