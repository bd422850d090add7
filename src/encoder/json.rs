//! Single-line JSON object layout.

use super::{Encoder, PrefixMode, TypeEncoder, compose_message};
use crate::record::Record;
use crate::value::{Opaque, Value};

/// How string values and keys are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonEscape {
    /// Wraps in quotes and backslash-escapes `"` only. Backslashes, control
    /// characters and non-ASCII pass through, so output is valid JSON for
    /// plain text but not for arbitrary strings.
    #[default]
    Minimal,
    /// Full JSON string escaping; always valid JSON.
    Full,
}

/// `{"level":..,"time":..,"pos":..,"msg":..,<fields>}` plus a newline.
#[derive(Debug, Clone)]
pub struct JsonEncoder {
    types: TypeEncoder,
    prefix_mode: PrefixMode,
}

fn quote_minimal(buf: &mut Vec<u8>, s: &str) {
    buf.reserve(s.len() + 2);
    buf.push(b'"');
    for b in s.bytes() {
        if b == b'"' {
            buf.push(b'\\');
        }
        buf.push(b);
    }
    buf.push(b'"');
}

fn quote_full(buf: &mut Vec<u8>, s: &str) {
    // Serializing a &str into a Vec cannot fail.
    let _ = serde_json::to_writer(&mut *buf, s);
}

/// Structured values keep their JSON shape; anything else becomes a JSON string.
fn json_default(buf: &mut Vec<u8>, value: &Opaque) {
    let _ = match value.json() {
        Some(json) => serde_json::to_writer(&mut *buf, json),
        None => serde_json::to_writer(&mut *buf, value.text()),
    };
}

impl Default for JsonEncoder {
    fn default() -> Self {
        Self::new("")
    }
}

impl JsonEncoder {
    /// An empty `time_format` selects `%Y%m%d%H%M%S`.
    #[must_use]
    pub fn new(time_format: &str) -> Self {
        Self {
            types: TypeEncoder::new(time_format, json_default).with_string(quote_minimal),
            prefix_mode: PrefixMode::default(),
        }
    }

    #[must_use]
    pub fn escape(mut self, escape: JsonEscape) -> Self {
        self.types.string = match escape {
            JsonEscape::Minimal => quote_minimal,
            JsonEscape::Full => quote_full,
        };
        self
    }

    #[must_use]
    pub const fn prefix_mode(mut self, mode: PrefixMode) -> Self {
        self.prefix_mode = mode;
        self
    }

    fn key(&self, buf: &mut Vec<u8>, key: &str) {
        self.types.encode_string(buf, key);
        buf.push(b':');
    }

    fn pair_str(&self, buf: &mut Vec<u8>, key: &str, value: &str) {
        self.key(buf, key);
        self.types.encode_string(buf, value);
    }

    fn pair_val(&self, buf: &mut Vec<u8>, key: &str, value: &Value) {
        self.key(buf, key);
        self.types.encode_val(buf, value);
    }
}

impl Encoder for JsonEncoder {
    fn encode(&self, buf: &mut Vec<u8>, record: &Record) -> Result<(), crate::Error> {
        buf.push(b'{');
        self.pair_str(buf, "level", record.level.as_str());
        buf.push(b',');
        self.key(buf, "time");
        self.types.encode_time(buf, &record.time);
        buf.push(b',');
        self.pair_str(buf, "pos", &record.position);
        buf.push(b',');
        self.pair_str(buf, "msg", &compose_message(record, self.prefix_mode));

        for field in &record.fields {
            buf.push(b',');
            self.pair_val(buf, &field.key, &field.value);
        }
        buf.extend_from_slice(b"}\n");
        Ok(())
    }
}
