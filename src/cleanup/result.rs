//! Outcome of one retention pass.

/// Callers (and tests) need to know what a pass removed and what it could not.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Removed files.
    pub deleted: Vec<String>,
    /// Bytes recovered.
    pub freed: u64,
    /// Files that could not be removed, with the reason.
    pub failed: Vec<(String, String)>,
}

impl CleanupResult {
    #[must_use]
    pub const fn count(&self) -> usize {
        self.deleted.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.deleted.is_empty() && self.failed.is_empty()
    }
}
