//! Automatic pattern animation.
//!
//! While auto mode is on, the loaded pattern plays one row per frame
//! interval, looping. The host drives [`AutoLights::step`] from its own
//! timer; all buffer access goes through the [`LightArbiter`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::LightArbiter;

pub struct AutoLights {
    lights: Arc<LightArbiter>,
    frame_interval: Duration,
    started: Instant,
}

impl AutoLights {
    pub fn new(lights: Arc<LightArbiter>, frame_interval: Duration) -> Self {
        Self {
            lights,
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            started: Instant::now(),
        }
    }

    /// Frame index for a point in the animation timeline.
    pub fn frame_at(&self, elapsed: Duration) -> usize {
        (elapsed.as_millis() / self.frame_interval.as_millis()) as usize
    }

    /// Advance the animation to the current time.
    pub fn step(&self) -> bool {
        self.step_at(self.started.elapsed())
    }

    pub fn step_at(&self, elapsed: Duration) -> bool {
        self.lights.show_pattern_frame(self.frame_at(elapsed))
    }
}
