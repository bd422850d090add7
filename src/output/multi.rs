//! One file per level per day: `<dir>/WARN.20240131.log`.

use super::options::ensure_dir;
use super::{BufferedFile, Clock, FileOptions, SystemClock, Writer};
use crate::cleanup::{self, multi_file_date, multi_file_name};
use crate::internal;
use crate::level::Level;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Which level files a record is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Routing {
    /// Every file whose level is at or below the record's: an `ERROR` record
    /// appears in the DEBUG, INFO, WARN and ERROR files.
    #[default]
    Cumulative,
    /// Only the file of the record's own level.
    Exclusive,
}

struct State {
    day: Option<NaiveDate>,
    file_date: Option<NaiveDate>,
    /// Indexed by `level.index() - min_level.index()`.
    files: Vec<BufferedFile>,
    closed: bool,
}

/// Daily-rotating files, one for each level from `min_level` to [`Level::MAX`].
pub struct MultiFileWriter {
    min_level: Level,
    routing: Routing,
    dir: PathBuf,
    opts: FileOptions,
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
}

impl std::fmt::Debug for MultiFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiFileWriter")
            .field("min_level", &self.min_level)
            .field("routing", &self.routing)
            .field("dir", &self.dir)
            .finish_non_exhaustive()
    }
}

impl MultiFileWriter {
    /// Creates the directory and opens today's files.
    ///
    /// # Errors
    /// A `~` directory that is not UTF-8, directory creation or initial open failure.
    pub fn new(min_level: Level, opts: FileOptions) -> Result<Self, crate::Error> {
        Self::with_clock(min_level, opts, Routing::default(), Arc::new(SystemClock))
    }

    /// Full constructor.
    ///
    /// # Errors
    /// A `~` directory that is not UTF-8, directory creation or initial open failure.
    pub fn with_clock(
        min_level: Level,
        opts: FileOptions,
        routing: Routing,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, crate::Error> {
        let dir = opts.resolve_dir()?;
        ensure_dir(&dir)?;

        let files = min_level.and_above().map(|_| BufferedFile::default()).collect();
        let writer = Self {
            min_level,
            routing,
            dir,
            opts,
            clock,
            state: Mutex::new(State {
                day: None,
                file_date: None,
                files,
                closed: false,
            }),
        };
        writer.check_daily(&mut writer.lock())?;
        Ok(writer)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub const fn min_level(&self) -> Level {
        self.min_level
    }

    /// Path of the file currently receiving `level` records.
    #[must_use]
    pub fn current_path(&self, level: Level) -> Option<PathBuf> {
        let slot = self.slot(level)?;
        self.lock().files.get(slot)?.path().map(PathBuf::from)
    }

    fn slot(&self, level: Level) -> Option<usize> {
        level.index().checked_sub(self.min_level.index())
    }

    fn check_daily(&self, state: &mut State) -> Result<(), crate::Error> {
        let today = self.clock.now().date_naive();
        if state.day == Some(today) {
            return Ok(());
        }
        state.day = Some(today);

        let mut outcome = Ok(());
        for (file, level) in state.files.iter_mut().zip(self.min_level.and_above()) {
            let path = self.dir.join(multi_file_name(level, today));
            if let Err(e) = file.open(&path, self.opts.buffer_size) {
                internal::error("ROTATE", &format!("Failed to open {}: {e}", path.display()));
                outcome = Err(e);
            }
        }
        if outcome.is_ok() {
            internal::debug("ROTATE", &format!("Rotated to {today} in {}", self.dir.display()));
            state.file_date = Some(today);
        }

        if let Some(date) = state.file_date {
            let _ = cleanup::clean_expired(&self.dir, date, self.opts.retention_days, multi_file_date);
        }
        outcome.map_err(Into::into)
    }
}

impl Writer for MultiFileWriter {
    /// Stops at the first failing file; files already written keep the record.
    fn write(&self, level: Level, bytes: &[u8]) -> Result<(), crate::Error> {
        let mut state = self.lock();
        if state.closed {
            return Ok(());
        }
        let _ = self.check_daily(&mut state);

        let Some(top) = self.slot(level) else {
            return Ok(());
        };
        let first = match self.routing {
            Routing::Cumulative => 0,
            Routing::Exclusive => top,
        };
        for file in &mut state.files[first..=top] {
            file.write(bytes)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        let mut state = self.lock();
        let mut outcome = Ok(());
        for file in &mut state.files {
            if let Err(e) = file.flush() {
                outcome = Err(e.into());
            }
        }
        outcome
    }

    fn close(&self) -> Result<(), crate::Error> {
        let mut state = self.lock();
        if state.closed {
            return Ok(());
        }
        state.closed = true;
        let mut outcome = Ok(());
        for file in &mut state.files {
            if let Err(e) = file.close() {
                outcome = Err(e.into());
            }
        }
        outcome
    }
}
