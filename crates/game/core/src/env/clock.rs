//! Wall-clock access for stamping results.

use std::time::{SystemTime, UNIX_EPOCH};

/// Source of completion timestamps.
pub trait ClockOracle: Send + Sync {
    fn now_unix_seconds(&self) -> u64;
}

/// Reads the host system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl ClockOracle for SystemClock {
    fn now_unix_seconds(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or(0)
    }
}

/// Always reports the same instant. Used by tests and replays.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedClock(pub u64);

impl ClockOracle for FixedClock {
    fn now_unix_seconds(&self) -> u64 {
        self.0
    }
}
