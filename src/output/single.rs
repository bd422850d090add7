//! Every record into one file per day: `<dir>/20240131.log`.

use super::options::ensure_dir;
use super::{BufferedFile, Clock, FileOptions, SystemClock, Writer};
use crate::cleanup::{self, single_file_date, single_file_name};
use crate::internal;
use crate::level::Level;
use chrono::NaiveDate;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

struct State {
    /// Date of the last rotation check; `None` until the first one.
    day: Option<NaiveDate>,
    /// Date of the file actually open, which lags `day` after a failed reopen.
    file_date: Option<NaiveDate>,
    file: BufferedFile,
    closed: bool,
}

/// Daily-rotating single file. Rotation check and write happen under one
/// lock, so no record can land in a file another thread is rotating away.
pub struct SingleFileWriter {
    dir: PathBuf,
    opts: FileOptions,
    clock: Arc<dyn Clock>,
    state: Mutex<State>,
}

impl std::fmt::Debug for SingleFileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SingleFileWriter")
            .field("dir", &self.dir)
            .field("opts", &self.opts)
            .finish_non_exhaustive()
    }
}

impl SingleFileWriter {
    /// Creates the directory and opens today's file.
    ///
    /// # Errors
    /// A `~` directory that is not UTF-8, directory creation or initial open failure.
    pub fn new(opts: FileOptions) -> Result<Self, crate::Error> {
        Self::with_clock(opts, Arc::new(SystemClock))
    }

    /// Like [`SingleFileWriter::new`] with an explicit time source.
    ///
    /// # Errors
    /// A `~` directory that is not UTF-8, directory creation or initial open failure.
    pub fn with_clock(opts: FileOptions, clock: Arc<dyn Clock>) -> Result<Self, crate::Error> {
        let dir = opts.resolve_dir()?;
        ensure_dir(&dir)?;

        let writer = Self {
            dir,
            opts,
            clock,
            state: Mutex::new(State {
                day: None,
                file_date: None,
                file: BufferedFile::default(),
                closed: false,
            }),
        };
        writer.check_daily(&mut writer.lock())?;
        Ok(writer)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Path of the file currently receiving records.
    #[must_use]
    pub fn current_path(&self) -> Option<PathBuf> {
        self.lock().file.path().map(PathBuf::from)
    }

    fn check_daily(&self, state: &mut State) -> Result<(), crate::Error> {
        let today = self.clock.now().date_naive();
        if state.day == Some(today) {
            return Ok(());
        }
        state.day = Some(today);

        let path = self.dir.join(single_file_name(today));
        let opened = state.file.open(&path, self.opts.buffer_size);
        match &opened {
            Ok(()) => {
                internal::debug("ROTATE", &format!("Opened {}", path.display()));
                state.file_date = Some(today);
            }
            Err(e) => internal::error("ROTATE", &format!("Failed to open {}: {e}", path.display())),
        }

        if let Some(date) = state.file_date {
            let _ = cleanup::clean_expired(&self.dir, date, self.opts.retention_days, single_file_date);
        }
        opened.map_err(Into::into)
    }
}

impl Writer for SingleFileWriter {
    fn write(&self, _level: Level, bytes: &[u8]) -> Result<(), crate::Error> {
        let mut state = self.lock();
        if state.closed {
            return Ok(());
        }
        let _ = self.check_daily(&mut state);
        state.file.write(bytes)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        self.lock().file.flush()?;
        Ok(())
    }

    fn close(&self) -> Result<(), crate::Error> {
        let mut state = self.lock();
        if state.closed {
            return Ok(());
        }
        state.closed = true;
        state.file.close()?;
        Ok(())
    }
}
