//! Time provider abstraction for testable time-dependent code.

use chrono::{DateTime, Utc};

/// Trait for providing the current wall-clock time.
///
/// This abstraction allows code that stamps ids and creation dates to be
/// tested with deterministic, controllable time values.
pub trait TimeProvider: Send + Sync {
    /// Returns the current time in UTC.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current Unix timestamp in milliseconds.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Production implementation that uses the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeProvider;

impl TimeProvider for SystemTimeProvider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl SystemTimeProvider {
    pub const fn new() -> Self {
        Self
    }
}
