//! Sinks for encoded records.
//!
//! The logger hands every rendered line to each registered [`Writer`] in
//! registration order. Writers may be shared by several loggers, so each
//! implementation serializes its own state internally.

mod buffered;
mod clock;
mod console;
mod multi;
mod options;
mod single;

pub use buffered::BufferedFile;
pub use clock::{Clock, SystemClock};
pub use console::ConsoleWriter;
pub use multi::{MultiFileWriter, Routing};
pub use options::FileOptions;
pub use single::SingleFileWriter;

use crate::level::Level;
use std::sync::Arc;

/// `Send + Sync` so one writer can be shared across loggers and threads.
pub trait Writer: Send + Sync {
    /// Appends one encoded record tagged with its level.
    ///
    /// # Errors
    /// I/O errors from the underlying sink. The logger does not surface them
    /// to the logging call site.
    fn write(&self, level: Level, bytes: &[u8]) -> Result<(), crate::Error>;

    /// Pushes buffered bytes to the OS.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> Result<(), crate::Error>;

    /// Flushes and releases the sink. Calling it again is a no-op, and
    /// writes after close are discarded.
    ///
    /// # Errors
    /// I/O errors from the final flush.
    fn close(&self) -> Result<(), crate::Error>;
}

impl<W: Writer + ?Sized> Writer for Arc<W> {
    fn write(&self, level: Level, bytes: &[u8]) -> Result<(), crate::Error> {
        (**self).write(level, bytes)
    }

    fn flush(&self) -> Result<(), crate::Error> {
        (**self).flush()
    }

    fn close(&self) -> Result<(), crate::Error> {
        (**self).close()
    }
}
