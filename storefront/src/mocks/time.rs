//! Mock time provider for testing.

use crate::traits::TimeProvider;
use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// Mock time provider with a controllable clock, in milliseconds.
#[derive(Debug, Clone)]
pub struct MockTime {
    current_millis: Arc<AtomicI64>,
}

impl MockTime {
    /// Create a new mock time provider starting at the given Unix millis.
    pub fn new(initial_millis: i64) -> Self {
        Self {
            current_millis: Arc::new(AtomicI64::new(initial_millis)),
        }
    }

    /// Create a mock time provider starting at 2024-01-01 00:00:00 UTC.
    pub fn default_time() -> Self {
        Self::new(1_704_067_200_000)
    }

    /// Set the clock to a specific instant.
    pub fn set(&self, at: DateTime<Utc>) {
        self.current_millis
            .store(at.timestamp_millis(), Ordering::SeqCst);
    }

    /// Advance the clock by the given number of milliseconds.
    pub fn advance_millis(&self, millis: i64) {
        self.current_millis.fetch_add(millis, Ordering::SeqCst);
    }

    /// Advance the clock by whole seconds.
    pub fn advance(&self, seconds: i64) {
        self.advance_millis(seconds * 1000);
    }
}

impl Default for MockTime {
    fn default() -> Self {
        Self::default_time()
    }
}

impl TimeProvider for MockTime {
    fn now(&self) -> DateTime<Utc> {
        let millis = self.current_millis.load(Ordering::SeqCst);
        Utc.timestamp_millis_opt(millis)
            .single()
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    fn now_millis(&self) -> i64 {
        self.current_millis.load(Ordering::SeqCst)
    }
}
