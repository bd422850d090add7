//! The logger: level gate, encoder and writer fan-out behind a cheap,
//! clonable handle.
//!
//! Every record goes Filter → Render → Fan-out → Recycle → Terminal action.
//! Clones and [`Logger::with_prefix`] views share one core, so they see the
//! same writers, encoder, level, flusher and closed state.

mod builder;
mod flusher;
mod from_config;

pub use builder::{FileBuilder, FileMode, LoggerBuilder};

use crate::encoder::Encoder;
use crate::level::Level;
use crate::output::Writer;
use crate::record::{Entry, PositionSupplier, Pool, Record};
use crate::value::{FieldArg, IntoArgs, Value};
use chrono::Local;
use flusher::{Flusher, WriterList, flush_all};
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError};
use std::time::Duration;

pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(30);
pub const DEFAULT_BACKLOG: usize = 100;

/// Process exit used by `Fatal` records.
fn exit_process() {
    std::process::exit(1);
}

pub(crate) struct Core {
    min_level: Level,
    encoder: Box<dyn Encoder>,
    writers: WriterList,
    records: Pool<Record>,
    buffers: Pool<Vec<u8>>,
    position: Box<dyn PositionSupplier>,
    flusher: Flusher,
    closed: AtomicBool,
    on_fatal: fn(),
}

impl Drop for Core {
    fn drop(&mut self) {
        if self.closed.load(Ordering::Acquire) {
            return;
        }
        self.flusher.stop();
        flush_all(&self.writers);
    }
}

/// A handle to a shared logging core plus this view's prefix.
#[derive(Clone)]
pub struct Logger {
    core: Arc<Core>,
    prefix: Arc<str>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("min_level", &self.core.min_level)
            .field("prefix", &self.prefix)
            .field("writers", &self.writer_count())
            .field("closed", &self.is_closed())
            .finish_non_exhaustive()
    }
}

impl Logger {
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// A logger with no writers yet; add them with [`Logger::add_writer`].
    ///
    /// `flush_secs == 0` and `backlog == 0` select the defaults (30 s, 100).
    #[must_use]
    pub fn new(level: Level, flush_secs: u64, backlog: usize, encoder: impl Encoder + 'static) -> Self {
        let interval = if flush_secs == 0 {
            DEFAULT_FLUSH_INTERVAL
        } else {
            Duration::from_secs(flush_secs)
        };
        Self::builder()
            .level(level)
            .flush_interval(interval)
            .backlog(backlog)
            .encoder(encoder)
            .build()
    }

    pub(crate) fn from_core(core: Core, prefix: &str) -> Self {
        Self {
            core: Arc::new(core),
            prefix: Arc::from(prefix),
        }
    }

    /// Registers another sink. Finish registering before logging starts;
    /// records already in flight may or may not reach a writer added mid-way.
    pub fn add_writer(&self, writer: impl Writer + 'static) {
        self.add_shared_writer(Arc::new(writer));
    }

    /// Registers a sink that other loggers may also hold.
    pub fn add_shared_writer(&self, writer: Arc<dyn Writer>) {
        self.core
            .writers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(writer);
    }

    #[must_use]
    pub fn writer_count(&self) -> usize {
        self.core
            .writers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.core.min_level
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// A view with a different prefix over the same core. Asking for the
    /// current prefix returns a plain clone.
    #[must_use]
    pub fn with_prefix(&self, prefix: &str) -> Self {
        if *self.prefix == *prefix {
            return self.clone();
        }
        Self {
            core: Arc::clone(&self.core),
            prefix: Arc::from(prefix),
        }
    }

    /// Whether a record at `level` would be written at all.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.core.min_level && !self.is_closed()
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.core.closed.load(Ordering::Acquire)
    }

    /// Number of records idle in the pool, for tests and tuning.
    #[must_use]
    pub fn idle_records(&self) -> usize {
        self.core.records.idle()
    }

    /// Starts a record carrying this view's prefix and the current time.
    pub fn entry(&self) -> Entry<'_> {
        let mut record = self.core.records.acquire();
        record.time = Local::now();
        record.prefix.push_str(&self.prefix);
        Entry::new(self, record)
    }

    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Entry<'_> {
        self.entry().with_field(key, value)
    }

    pub fn with_fields(&self, args: impl IntoIterator<Item = FieldArg>) -> Entry<'_> {
        self.entry().with_fields(args)
    }

    pub(crate) fn position(&self, caller: &'static Location<'static>, depth: usize) -> String {
        self.core.position.position(caller, depth)
    }

    pub(crate) fn recycle(&self, record: Record) {
        self.core.records.release(record);
    }

    /// Runs a finished record through the pipeline. Writer errors are
    /// swallowed; the record goes back to the pool whatever happens.
    ///
    /// # Panics
    /// For `Panic` records, with the rendered line as the message.
    pub fn write(&self, record: Record) {
        let core = &*self.core;
        if record.level < core.min_level || self.is_closed() {
            core.records.release(record);
            return;
        }

        let level = record.level;
        let mut buf = core.buffers.acquire();
        if core.encoder.encode(&mut buf, &record).is_ok() {
            let writers = core.writers.read().unwrap_or_else(PoisonError::into_inner);
            for writer in writers.iter() {
                let _ = writer.write(level, &buf);
            }
        }

        let rendered = (level == Level::Panic).then(|| {
            let text = String::from_utf8_lossy(&buf);
            text.trim_end_matches('\n').to_string()
        });
        core.buffers.release(buf);
        core.records.release(record);

        match level {
            Level::Panic => panic!("{}", rendered.unwrap_or_default()),
            Level::Fatal => {
                self.close();
                (core.on_fatal)();
            }
            _ => {}
        }
    }

    /// Requests a flush of every writer. With a flush thread the request is
    /// handed over without blocking and coalesced with any pending one;
    /// without one the writers are flushed inline.
    pub fn flush(&self) {
        if !self.core.flusher.request() {
            flush_all(&self.core.writers);
        }
    }

    /// Flushes every writer on the calling thread.
    ///
    /// # Errors
    /// The first writer error; later writers are still flushed.
    pub fn sync(&self) -> Result<(), crate::Error> {
        let writers = self.core.writers.read().unwrap_or_else(PoisonError::into_inner);
        let mut outcome = Ok(());
        for writer in writers.iter() {
            if let Err(e) = writer.flush()
                && outcome.is_ok()
            {
                outcome = Err(e);
            }
        }
        outcome
    }

    /// Stops the flush thread and closes every writer. Only the first call
    /// does anything; afterwards all records are discarded.
    pub fn close(&self) {
        if self
            .core
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }
        self.core.flusher.stop();
        let writers = self.core.writers.read().unwrap_or_else(PoisonError::into_inner);
        for writer in writers.iter() {
            let _ = writer.close();
        }
    }

    /// Logs at `level` reporting a call site `depth` frames above the caller.
    /// Filtered levels return before a record is taken from the pool.
    #[track_caller]
    pub fn depth(&self, level: Level, depth: usize, args: impl IntoArgs) {
        if self.enabled(level) {
            self.entry().depth(level, depth, args);
        }
    }

    /// Formatted counterpart of [`Logger::depth`].
    #[track_caller]
    pub fn depthf(&self, level: Level, depth: usize, format: &str, args: impl IntoArgs) {
        if self.enabled(level) {
            self.entry().depthf(level, depth, format, args);
        }
    }

    #[track_caller]
    pub fn debug(&self, args: impl IntoArgs) {
        self.depth(Level::Debug, 0, args);
    }

    #[track_caller]
    pub fn info(&self, args: impl IntoArgs) {
        self.depth(Level::Info, 0, args);
    }

    #[track_caller]
    pub fn warn(&self, args: impl IntoArgs) {
        self.depth(Level::Warn, 0, args);
    }

    #[track_caller]
    pub fn error(&self, args: impl IntoArgs) {
        self.depth(Level::Error, 0, args);
    }

    #[track_caller]
    pub fn panic(&self, args: impl IntoArgs) {
        self.depth(Level::Panic, 0, args);
    }

    #[track_caller]
    pub fn fatal(&self, args: impl IntoArgs) {
        self.depth(Level::Fatal, 0, args);
    }

    #[track_caller]
    pub fn debugf(&self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Debug, 0, format, args);
    }

    #[track_caller]
    pub fn infof(&self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Info, 0, format, args);
    }

    #[track_caller]
    pub fn warnf(&self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Warn, 0, format, args);
    }

    #[track_caller]
    pub fn errorf(&self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Error, 0, format, args);
    }

    #[track_caller]
    pub fn panicf(&self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Panic, 0, format, args);
    }

    #[track_caller]
    pub fn fatalf(&self, format: &str, args: impl IntoArgs) {
        self.depthf(Level::Fatal, 0, format, args);
    }
}
