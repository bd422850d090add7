//! The pending log event and the builder-style handle callers attach fields to.

mod pool;
mod position;

pub use pool::{Pool, Reset};
pub use position::{CallerLocation, PositionSupplier};

use crate::level::Level;
use crate::logger::Logger;
use crate::value::{Field, FieldArg, IntoArgs, Value};
use chrono::{DateTime, Local};
use std::panic::Location;

/// One log event awaiting encoding. Pool-owned: a record is taken from the
/// logger's pool when an entry starts and handed back, fully reset, once the
/// record has been written or discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub level: Level,
    pub time: DateTime<Local>,
    pub position: String,
    pub prefix: String,
    /// printf-style format; empty means "join the args with spaces".
    pub format: String,
    pub args: Vec<Value>,
    pub fields: Vec<Field>,
}

impl Record {
    pub fn push_field(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.push(Field::new(key, value));
    }

    /// Appends an alternating key/value list, accepting pre-built fields anywhere.
    ///
    /// A string in key position pairs with the next element (a following
    /// `Field` contributes its value). A non-string in key position skips
    /// itself and the next element. A trailing key with no value is dropped.
    pub fn push_fields(&mut self, args: impl IntoIterator<Item = FieldArg>) {
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg {
                FieldArg::Field(field) => self.fields.push(field),
                FieldArg::Value(Value::Str(key)) => match args.next() {
                    Some(FieldArg::Value(value)) => self.fields.push(Field { key, value }),
                    Some(FieldArg::Field(field)) => self.fields.push(Field {
                        key,
                        value: field.value,
                    }),
                    None => {}
                },
                FieldArg::Value(_) => {
                    args.next();
                }
            }
        }
    }
}

impl Reset for Record {
    fn reset(&mut self) {
        self.level = Level::default();
        self.time = DateTime::<Local>::default();
        self.position.clear();
        self.prefix.clear();
        self.format.clear();
        self.args.clear();
        self.fields.clear();
    }
}

/// A record under construction, bound to the logger that will write it.
///
/// Dropping an entry without calling one of the level methods returns the
/// record to the pool unwritten.
#[must_use = "an entry does nothing until a level method such as `info` is called"]
pub struct Entry<'a> {
    logger: &'a Logger,
    record: Option<Record>,
}

impl<'a> Entry<'a> {
    pub(crate) const fn new(logger: &'a Logger, record: Record) -> Self {
        Self {
            logger,
            record: Some(record),
        }
    }

    fn record_mut(&mut self) -> Option<&mut Record> {
        self.record.as_mut()
    }

    /// Appends one field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let Some(record) = self.record_mut() {
            record.push_field(key, value);
        }
        self
    }

    /// Appends an alternating key/value list; see [`Record::push_fields`].
    pub fn with_fields(mut self, args: impl IntoIterator<Item = FieldArg>) -> Self {
        if let Some(record) = self.record_mut() {
            record.push_fields(args);
        }
        self
    }

    /// Fields attached so far, mostly for wrapper layers and tests.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        match &self.record {
            Some(record) => &record.fields,
            None => &[],
        }
    }

    /// Writes the record at `level`, reporting a call site `depth` frames above the caller.
    #[track_caller]
    pub fn depth(self, level: Level, depth: usize, args: impl IntoArgs) {
        self.finish(level, depth, "", args.into_args(), Location::caller());
    }

    /// Formatted counterpart of [`Entry::depth`].
    #[track_caller]
    pub fn depthf(self, level: Level, depth: usize, format: &str, args: impl IntoArgs) {
        self.finish(level, depth, format, args.into_args(), Location::caller());
    }

    fn finish(
        mut self,
        level: Level,
        depth: usize,
        format: &str,
        args: Vec<Value>,
        caller: &'static Location<'static>,
    ) {
        let Some(mut record) = self.record.take() else {
            return;
        };
        record.level = level;
        record.position = self.logger.position(caller, depth);
        record.format.push_str(format);
        record.args = args;
        self.logger.write(record);
    }

    #[track_caller]
    pub fn debug(self, args: impl IntoArgs) {
        self.depth(Level::Debug, 0, args);
    }

    #[track_caller]
    pub fn info(self, args: impl IntoArgs) {
        self.depth(Level::Info, 0, args);
    }

    #[track_caller]
    pub fn warn(self, args: impl IntoArgs) {
        self.depth(Level::Warn, 0, args);
    }

    #[track_caller]
    pub fn error(self, args: impl IntoArgs) {
        self.depth(Level::Error, 0, args);
    }

    /// Writes the record, then panics with the rendered line as the message.
    #[track_caller]
    pub fn panic(self, args: impl IntoArgs) {
        self.depth(Level::Panic, 0, args);
    }

    /// Writes the record, closes the logger and exits the process.
    #[track_caller]
    pub fn fatal(self, args: impl IntoArgs) {
        self.depth(Level::Fatal, 0, args);
    }

    #[track_caller]
    pub fn debugf(self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Debug, 0, format, args);
    }

    #[track_caller]
    pub fn infof(self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Info, 0, format, args);
    }

    #[track_caller]
    pub fn warnf(self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Warn, 0, format, args);
    }

    #[track_caller]
    pub fn errorf(self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Error, 0, format, args);
    }

    #[track_caller]
    pub fn panicf(self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Panic, 0, format, args);
    }

    #[track_caller]
    pub fn fatalf(self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Fatal, 0, format, args);
    }
}

impl Drop for Entry<'_> {
    fn drop(&mut self) {
        if let Some(record) = self.record.take() {
            self.logger.recycle(record);
        }
    }
}
