//! Light-buffer arbiter.
//!
//! The light buffer has two kinds of writers: script host functions on
//! the host loop, and the auto-lights effect on its own timer. Every
//! mutation takes the same lock for its full duration, including the
//! pattern decode, so a bulk load and a pixel write never interleave.

use keybow_domain::{KeyIndex, KeyTable, LightBuffer, Pattern, Rgb, StoreName};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, warn};

use crate::ports::pattern_source::PatternSourcePort;

struct LightState {
    buffer: LightBuffer,
    pattern: Option<Pattern>,
    frame: Option<usize>,
    dirty: bool,
}

pub struct LightArbiter {
    state: Mutex<LightState>,
    auto: AtomicBool,
}

impl LightArbiter {
    pub fn new(led_count: usize, auto: bool) -> Self {
        Self {
            state: Mutex::new(LightState {
                buffer: LightBuffer::new(led_count),
                pattern: None,
                frame: None,
                dirty: true,
            }),
            auto: AtomicBool::new(auto),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LightState> {
        // Writers only store whole pixels, so a poisoned buffer is still coherent.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Colour the LED under key `index`.
    ///
    /// Returns `false` if the key is not in `keys` or its LED is outside
    /// the buffer; the buffer is untouched in that case.
    pub fn set_pixel(&self, keys: &KeyTable, index: KeyIndex, color: Rgb) -> bool {
        let Some(led) = keys.led_for(index) else {
            debug!("set_pixel: unknown key {}", index);
            return false;
        };
        let mut state = self.lock();
        let written = state.buffer.set(led, color);
        state.dirty |= written;
        written
    }

    pub fn set_all(&self, color: Rgb) {
        let mut state = self.lock();
        state.buffer.fill(color);
        state.dirty = true;
    }

    /// Replace the buffer with frame 0 of the pattern called `name`.
    ///
    /// The buffer is left unchanged when the pattern cannot be loaded.
    pub fn load_pattern(&self, source: &dyn PatternSourcePort, name: &StoreName) -> bool {
        let mut state = self.lock();
        let pattern = match source.load(name) {
            Ok(pattern) => pattern,
            Err(e) => {
                warn!("Failed to load pattern '{}': {}", name, e);
                return false;
            }
        };
        let Some(first) = pattern.frame(0) else {
            warn!("Pattern '{}' has no frames", name);
            return false;
        };
        state.buffer.load_frame(first);
        state.frame = Some(0);
        state.pattern = Some(pattern);
        state.dirty = true;
        true
    }

    pub fn set_auto(&self, enabled: bool) {
        self.auto.store(enabled, Ordering::Relaxed);
    }

    pub fn is_auto(&self) -> bool {
        self.auto.load(Ordering::Relaxed)
    }

    /// Show frame `frame % frame_count` of the loaded pattern.
    ///
    /// Does nothing while auto mode is off, without a pattern, or when the
    /// frame is already shown. Returns whether the buffer changed.
    pub fn show_pattern_frame(&self, frame: usize) -> bool {
        if !self.is_auto() {
            return false;
        }
        let mut state = self.lock();
        let state = &mut *state;
        let Some(pattern) = state.pattern.as_ref() else {
            return false;
        };
        let count = pattern.frame_count();
        if count == 0 {
            return false;
        }
        let frame = frame % count;
        if state.frame == Some(frame) {
            return false;
        }
        if let Some(pixels) = pattern.frame(frame) {
            state.buffer.load_frame(pixels);
            state.frame = Some(frame);
            state.dirty = true;
            return true;
        }
        false
    }

    pub fn frame_count(&self) -> usize {
        self.lock().pattern.as_ref().map_or(0, Pattern::frame_count)
    }

    pub fn snapshot(&self) -> LightBuffer {
        self.lock().buffer.clone()
    }

    pub fn pixel(&self, led: usize) -> Option<Rgb> {
        self.lock().buffer.get(led)
    }

    /// Return the buffer if it changed since the last call.
    pub fn take_dirty(&self) -> Option<LightBuffer> {
        let mut state = self.lock();
        if !state.dirty {
            return None;
        }
        state.dirty = false;
        Some(state.buffer.clone())
    }
}
