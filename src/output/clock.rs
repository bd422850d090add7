//! Time source for date-based rotation.

use chrono::{DateTime, Local};

/// File writers ask the clock for "now" on every write; a change of local
/// date in either direction triggers rotation.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
