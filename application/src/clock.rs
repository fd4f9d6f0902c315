//! Tick clock: monotonic milliseconds since a session started.

use std::time::Instant;

/// Captures the epoch of a script session.
///
/// Backed by [`Instant`], so readings never go backwards and ignore
/// wall-clock adjustments.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    epoch: Instant,
}

impl TickClock {
    pub fn start() -> Self {
        Self {
            epoch: Instant::now(),
        }
    }

    pub fn elapsed_millis(&self) -> u64 {
        u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}
