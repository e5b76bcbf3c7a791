// gridsim_cli/src/cadence.rs
#![forbid(unsafe_code)]

use std::time::{Duration, Instant};

/// Fixed-interval gate: the owning loop asks `ready()` every frame and
/// advances its simulation only when the interval has elapsed.
///
/// A zero interval is always ready.
pub struct Cadence {
    interval: Duration,
    last: Instant,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Instant::now(),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// True (and re-armed at `now`) once `interval` has passed since the last firing.
    pub fn ready(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            return true;
        }
        false
    }

    /// Time left until the next firing (zero if already due).
    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval
            .saturating_sub(now.saturating_duration_since(self.last))
    }
}
