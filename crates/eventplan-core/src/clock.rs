//! Time source for game timestamps.
//!
//! Aggregates never read the system time themselves; every transition takes
//! a `&dyn Clock` so that `created_at` and `updated_at` are reproducible in
//! tests.

use chrono::{DateTime, Utc};

/// Supplies the timestamp stamped on a game transition.
pub trait Clock: Send + Sync {
    /// The current instant, in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used by the server.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_does_not_go_backwards() {
        let first = SystemClock.now();
        let second = SystemClock.now();
        assert!(second >= first);
    }
}
