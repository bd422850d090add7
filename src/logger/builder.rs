//! Stepwise construction of a [`Logger`], with a sub-builder for the
//! rotating file writers.

use super::flusher::Flusher;
use super::{Core, DEFAULT_BACKLOG, DEFAULT_FLUSH_INTERVAL, Logger, exit_process};
use crate::encoder::{Encoder, TextEncoder};
use crate::level::Level;
use crate::output::{
    Clock, ConsoleWriter, FileOptions, MultiFileWriter, Routing, SingleFileWriter, SystemClock,
    Writer,
};
use crate::record::{CallerLocation, Pool, PositionSupplier};
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use std::time::Duration;

pub struct LoggerBuilder {
    level: Level,
    flush_interval: Duration,
    backlog: usize,
    encoder: Option<Box<dyn Encoder>>,
    prefix: String,
    writers: Vec<Arc<dyn Writer>>,
    position: Option<Box<dyn PositionSupplier>>,
    on_fatal: fn(),
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("level", &self.level)
            .field("flush_interval", &self.flush_interval)
            .field("backlog", &self.backlog)
            .field("prefix", &self.prefix)
            .field("writers", &self.writers.len())
            .finish_non_exhaustive()
    }
}

impl LoggerBuilder {
    /// Debug level, 30 s flush interval, backlog 100, text encoder, no writers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            level: Level::Debug,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            backlog: DEFAULT_BACKLOG,
            encoder: None,
            prefix: String::new(),
            writers: Vec::new(),
            position: None,
            on_fatal: exit_process,
        }
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Period of the background flush. Zero disables the thread; then
    /// [`Logger::flush`] flushes on the calling thread.
    #[must_use]
    pub const fn flush_interval(mut self, interval: Duration) -> Self {
        self.flush_interval = interval;
        self
    }

    #[must_use]
    pub const fn flush_secs(self, secs: u64) -> Self {
        self.flush_interval(Duration::from_secs(secs))
    }

    /// Idle records and buffers kept for reuse. Zero selects the default.
    #[must_use]
    pub const fn backlog(mut self, backlog: usize) -> Self {
        self.backlog = if backlog == 0 { DEFAULT_BACKLOG } else { backlog };
        self
    }

    #[must_use]
    pub fn encoder(mut self, encoder: impl Encoder + 'static) -> Self {
        self.encoder = Some(Box::new(encoder));
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn writer(self, writer: impl Writer + 'static) -> Self {
        self.shared_writer(Arc::new(writer))
    }

    /// A writer that other loggers hold too.
    #[must_use]
    pub fn shared_writer(mut self, writer: Arc<dyn Writer>) -> Self {
        self.writers.push(writer);
        self
    }

    /// Shortcut for a [`ConsoleWriter`] on stdout/stderr.
    #[must_use]
    pub fn console(self) -> Self {
        self.writer(ConsoleWriter::new())
    }

    /// Replaces the default `dir/file.rs:line` position text.
    #[must_use]
    pub fn position(mut self, supplier: impl PositionSupplier + 'static) -> Self {
        self.position = Some(Box::new(supplier));
        self
    }

    /// What a `Fatal` record runs after closing the logger. The default exits
    /// the process with status 1.
    #[doc(hidden)]
    #[must_use]
    pub const fn on_fatal(mut self, hook: fn()) -> Self {
        self.on_fatal = hook;
        self
    }

    #[must_use]
    pub fn file(self) -> FileBuilder {
        FileBuilder {
            parent: self,
            mode: FileMode::default(),
            level: None,
            routing: Routing::default(),
            opts: FileOptions::default(),
            clock: None,
        }
    }

    #[must_use]
    pub fn build(self) -> Logger {
        let writers = Arc::new(RwLock::new(self.writers));
        // Above the top level nothing is buffered long enough to need a timer.
        let flusher = if self.flush_interval.is_zero() || self.level >= Level::MAX {
            Flusher::disabled()
        } else {
            Flusher::spawn(self.flush_interval, Arc::clone(&writers))
        };

        let core = Core {
            min_level: self.level,
            encoder: self
                .encoder
                .unwrap_or_else(|| Box::new(TextEncoder::default())),
            writers,
            records: Pool::new(self.backlog),
            buffers: Pool::new(self.backlog),
            position: self
                .position
                .unwrap_or_else(|| Box::new(CallerLocation)),
            flusher,
            closed: AtomicBool::new(false),
            on_fatal: self.on_fatal,
        };
        Logger::from_core(core, &self.prefix)
    }
}

/// Single `<date>.log` file or one `<LEVEL>.<date>.log` per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    Single,
    #[default]
    Multi,
}

/// Rotating file writer settings; [`FileBuilder::done`] opens the files.
pub struct FileBuilder {
    parent: LoggerBuilder,
    mode: FileMode,
    level: Option<Level>,
    routing: Routing,
    opts: FileOptions,
    clock: Option<Arc<dyn Clock>>,
}

impl FileBuilder {
    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.opts = self.opts.dir(dir);
        self
    }

    #[must_use]
    pub fn buffer_size(mut self, bytes: usize) -> Self {
        self.opts = self.opts.buffer_size(bytes);
        self
    }

    /// `<= 0` keeps every file.
    #[must_use]
    pub fn retention_days(mut self, days: i64) -> Self {
        self.opts = self.opts.retention_days(days);
        self
    }

    #[must_use]
    pub fn options(mut self, opts: FileOptions) -> Self {
        self.opts = opts;
        self
    }

    #[must_use]
    pub const fn mode(mut self, mode: FileMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub const fn single(self) -> Self {
        self.mode(FileMode::Single)
    }

    /// Lowest level that gets its own file in multi-file mode. Defaults to
    /// the logger's level.
    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    #[must_use]
    pub const fn routing(mut self, routing: Routing) -> Self {
        self.routing = routing;
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Creates the directory, opens today's files and returns to the logger builder.
    ///
    /// # Errors
    /// Directory creation or initial open failure.
    pub fn done(self) -> Result<LoggerBuilder, crate::Error> {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let parent = self.parent;
        let writer: Arc<dyn Writer> = match self.mode {
            FileMode::Single => Arc::new(SingleFileWriter::with_clock(self.opts, clock)?),
            FileMode::Multi => Arc::new(MultiFileWriter::with_clock(
                self.level.unwrap_or(parent.level),
                self.opts,
                self.routing,
                clock,
            )?),
        };
        Ok(parent.shared_writer(writer))
    }
}
