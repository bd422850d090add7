//! `key=value` layout for humans and grep.

use super::{Encoder, PrefixMode, TypeEncoder, compose_message};
use crate::record::Record;
use crate::value::{Opaque, Value};

/// Space-separated `key<sep>value` pairs, newline terminated. Strings are
/// written unquoted; values outside the known kinds use their display text.
#[derive(Debug, Clone)]
pub struct TextEncoder {
    types: TypeEncoder,
    separator: String,
    prefix_mode: PrefixMode,
}

fn display_text(buf: &mut Vec<u8>, value: &Opaque) {
    buf.extend_from_slice(value.text().as_bytes());
}

impl Default for TextEncoder {
    fn default() -> Self {
        Self::new("", "")
    }
}

impl TextEncoder {
    /// Empty arguments select the defaults: `%Y%m%d%H%M%S` and `=`.
    #[must_use]
    pub fn new(time_format: &str, separator: &str) -> Self {
        let separator = if separator.is_empty() { "=" } else { separator };
        Self {
            types: TypeEncoder::new(time_format, display_text),
            separator: separator.to_string(),
            prefix_mode: PrefixMode::default(),
        }
    }

    #[must_use]
    pub const fn prefix_mode(mut self, mode: PrefixMode) -> Self {
        self.prefix_mode = mode;
        self
    }

    /// Swaps the value dispatcher, for callers that want to override a hook.
    #[must_use]
    pub fn with_types(mut self, types: TypeEncoder) -> Self {
        self.types = types;
        self
    }

    #[must_use]
    pub fn separator(&self) -> &str {
        &self.separator
    }

    fn pair(
        &self,
        buf: &mut Vec<u8>,
        key: &str,
        write_value: impl FnOnce(&TypeEncoder, &mut Vec<u8>),
    ) {
        buf.extend_from_slice(key.as_bytes());
        buf.extend_from_slice(self.separator.as_bytes());
        write_value(&self.types, buf);
    }

    fn pair_val(&self, buf: &mut Vec<u8>, key: &str, value: &Value) {
        self.pair(buf, key, |t, buf| t.encode_val(buf, value));
    }
}

impl Encoder for TextEncoder {
    fn encode(&self, buf: &mut Vec<u8>, record: &Record) -> Result<(), crate::Error> {
        self.pair(buf, "level", |t, buf| t.encode_string(buf, record.level.as_str()));
        buf.push(b' ');
        self.pair(buf, "time", |t, buf| t.encode_time(buf, &record.time));
        buf.push(b' ');
        self.pair(buf, "pos", |t, buf| t.encode_string(buf, &record.position));
        buf.push(b' ');
        let msg = compose_message(record, self.prefix_mode);
        self.pair(buf, "msg", |t, buf| t.encode_string(buf, &msg));

        for field in &record.fields {
            buf.push(b' ');
            self.pair_val(buf, &field.key, &field.value);
        }
        buf.push(b'\n');
        Ok(())
    }
}
