//! Tick cadence and settle delay for session runners.

use std::time::Duration;

use super::constants::{DEFAULT_SETTLE_DELAY, DEFAULT_TICK_INTERVAL, PROGRESS_COMPLETE};

/// Timing parameters shared by every session a registry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTiming {
    /// Delay between progress ticks. Must be non-zero.
    pub tick_interval: Duration,
    /// Delay between reaching 100% and handing off.
    pub settle_delay: Duration,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

impl SessionTiming {
    /// Creates timing from millisecond values; a zero tick interval is raised to 1 ms.
    #[must_use]
    pub fn from_millis(tick_interval_ms: u64, settle_delay_ms: u64) -> Self {
        Self {
            tick_interval: Duration::from_millis(tick_interval_ms.max(1)),
            settle_delay: Duration::from_millis(settle_delay_ms),
        }
    }

    /// Wall time from the first tick to hand-off.
    #[must_use]
    pub fn total_duration(&self) -> Duration {
        self.tick_interval * u32::from(PROGRESS_COMPLETE) + self.settle_delay
    }
}
