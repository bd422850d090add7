//! Console sink: errors and worse to stderr, everything else to stdout.

use super::Writer;
use crate::level::Level;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

struct Targets {
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
}

/// Splits records between two streams by level. One lock guards both so
/// lines from concurrent loggers never interleave.
pub struct ConsoleWriter {
    targets: Mutex<Targets>,
}

impl std::fmt::Debug for ConsoleWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleWriter").finish_non_exhaustive()
    }
}

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleWriter {
    /// Process stdout and stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_targets(io::stdout(), io::stderr())
    }

    /// Only stderr, for diagnostics that must not mix with program output.
    #[must_use]
    pub fn stderr_only() -> Self {
        Self::with_targets(io::stderr(), io::stderr())
    }

    /// Arbitrary streams; tests capture output this way.
    pub fn with_targets(out: impl Write + Send + 'static, err: impl Write + Send + 'static) -> Self {
        Self {
            targets: Mutex::new(Targets {
                out: Box::new(out),
                err: Box::new(err),
            }),
        }
    }
}

impl Writer for ConsoleWriter {
    fn write(&self, level: Level, bytes: &[u8]) -> Result<(), crate::Error> {
        let mut targets = self.targets.lock().unwrap_or_else(PoisonError::into_inner);
        let target = if level >= Level::Error {
            &mut targets.err
        } else {
            &mut targets.out
        };
        target.write_all(bytes)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        let mut targets = self.targets.lock().unwrap_or_else(PoisonError::into_inner);
        targets.out.flush()?;
        targets.err.flush()?;
        Ok(())
    }

    /// The standard streams outlive any logger; closing only flushes them.
    fn close(&self) -> Result<(), crate::Error> {
        self.flush()
    }
}
