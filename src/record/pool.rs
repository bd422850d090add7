//! Free lists for records and render buffers.
//!
//! Hot logging paths would otherwise allocate a record, its field vector and
//! an output buffer on every call. A released item is always reset before it
//! is stored, so the next user never observes data from the previous one.

use std::sync::{Mutex, PoisonError};

/// Clears an item's contents while keeping its allocations.
pub trait Reset {
    fn reset(&mut self);
}

impl Reset for Vec<u8> {
    fn reset(&mut self) {
        self.clear();
    }
}

/// A bounded, thread-safe free list.
///
/// `capacity` caps how many idle items are retained; releases beyond it are
/// dropped. Acquiring from an empty pool allocates a fresh `T::default()`.
#[derive(Debug)]
pub struct Pool<T> {
    free: Mutex<Vec<T>>,
    capacity: usize,
}

impl<T: Reset + Default> Pool<T> {
    #[must_use]
    pub const fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Takes an idle item, or a new one when none is idle.
    pub fn acquire(&self) -> T {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
            .unwrap_or_default()
    }

    /// Resets `item` and keeps it for reuse if there is room.
    pub fn release(&self, mut item: T) {
        item.reset();
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < self.capacity {
            free.push(item);
        }
    }

    /// Number of idle items currently retained.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}
