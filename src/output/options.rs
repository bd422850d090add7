//! Settings shared by the single-file and multi-file writers.

use std::path::{Path, PathBuf};

/// Defaults: `logs` directory, 40 KiB buffers, 14 days retention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOptions {
    /// Directory holding the log files; a leading `~` is expanded.
    pub dir: PathBuf,
    /// Write buffer per open file.
    pub buffer_size: usize,
    /// Rotated files older than this many days are deleted; `<= 0` keeps everything.
    pub retention_days: i64,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("logs"),
            buffer_size: 40 * 1024,
            retention_days: 14,
        }
    }
}

impl FileOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    #[must_use]
    pub const fn buffer_size(mut self, bytes: usize) -> Self {
        self.buffer_size = bytes;
        self
    }

    #[must_use]
    pub const fn retention_days(mut self, days: i64) -> Self {
        self.retention_days = days;
        self
    }

    /// Config values use `~` for portability; the OS needs the real path.
    ///
    /// # Errors
    /// [`crate::Error::InvalidPath`] for a `~` path that is not valid UTF-8.
    pub(crate) fn resolve_dir(&self) -> Result<PathBuf, crate::Error> {
        if !self.dir.as_os_str().as_encoded_bytes().starts_with(b"~") {
            return Ok(self.dir.clone());
        }
        let raw = self.dir.to_str().ok_or_else(|| {
            crate::Error::InvalidPath(format!("non UTF-8 path: {}", self.dir.display()))
        })?;
        Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
    }
}

/// Creates the log directory with its parents.
pub(super) fn ensure_dir(dir: &Path) -> Result<(), crate::Error> {
    if dir.is_dir() {
        return Ok(());
    }
    match std::fs::create_dir_all(dir) {
        Ok(()) => {
            crate::internal::debug("FILE", &format!("Created directory: {}", dir.display()));
            Ok(())
        }
        Err(e) => {
            crate::internal::error(
                "FILE",
                &format!("Failed to create directory {}: {e}", dir.display()),
            );
            Err(e.into())
        }
    }
}
