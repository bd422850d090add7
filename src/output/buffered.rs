//! One open log file behind a write buffer.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Owned exclusively by the writer that opened it. Reopening swaps in the
/// new file only after it opened successfully, so a failed rotation leaves
/// the previous file in place.
#[derive(Debug, Default)]
pub struct BufferedFile {
    inner: Option<BufWriter<File>>,
    path: Option<PathBuf>,
}

impl BufferedFile {
    /// Opens `path` for appending (creating it), then flushes and closes the previous file.
    ///
    /// # Errors
    /// The open error; the previous file stays active in that case.
    pub fn open(&mut self, path: &Path, buffer_size: usize) -> io::Result<()> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        if let Some(mut previous) = self.inner.take() {
            // The new file is already open; a failed final flush of the old one
            // must not block the switch.
            let _ = previous.flush();
        }
        self.inner = Some(BufWriter::with_capacity(buffer_size.max(1), file));
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// # Errors
    /// `NotConnected` when no file is open, otherwise the write error.
    pub fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        match self.inner.as_mut() {
            Some(file) => file.write_all(bytes),
            None => Err(io::Error::new(io::ErrorKind::NotConnected, "log file not open")),
        }
    }

    /// # Errors
    /// The flush error.
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.as_mut().map_or(Ok(()), Write::flush)
    }

    /// Flushes and drops the file. A second call finds nothing to close.
    ///
    /// # Errors
    /// The final flush error; the file is released either way.
    pub fn close(&mut self) -> io::Result<()> {
        self.inner.take().map_or(Ok(()), |mut file| file.flush())
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.inner.is_some()
    }

    /// Path of the current (or most recently closed) file.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
