//! Deterministic clock abstraction for testable time-dependent logic.
//!
//! Expiration dates are compared against local wall-clock time, so the
//! clock hands out `DateTime<Local>` rather than UTC.

use chrono::{DateTime, Local};

/// Clock trait for deterministic time in tests.
pub trait Clock: Send + Sync {
    /// Get the current local time.
    fn now(&self) -> DateTime<Local>;
}

/// System clock using actual wall time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Mock clock for deterministic testing.
#[cfg(any(test, feature = "test-seams"))]
#[derive(Debug, Clone)]
pub struct MockClock {
    now: DateTime<Local>,
}

#[cfg(any(test, feature = "test-seams"))]
impl MockClock {
    /// Create a mock clock frozen at the given time.
    pub fn new(now: DateTime<Local>) -> Self {
        Self { now }
    }

    /// Create a mock clock frozen at a local wall-clock time
    /// written as `YYYY-MM-DD HH:MM:SS`.
    pub fn at_local(s: &str) -> Self {
        use chrono::{NaiveDateTime, TimeZone};

        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
            .expect("valid local timestamp");
        Self {
            now: Local
                .from_local_datetime(&naive)
                .earliest()
                .expect("timestamp exists in local zone"),
        }
    }

    /// Advance the clock by a duration.
    pub fn advance(&mut self, duration: chrono::Duration) {
        self.now += duration;
    }
}

#[cfg(any(test, feature = "test-seams"))]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Local> {
        self.now
    }
}
