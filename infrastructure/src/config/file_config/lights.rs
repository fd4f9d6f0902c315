//! LED configuration from TOML (`[lights]` section)

use crate::devices::APA102_MAX_BRIGHTNESS as MAX_BRIGHTNESS;
use keybow_domain::ConfigIssue;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw lights configuration from TOML
///
/// # Example
///
/// ```toml
/// [lights]
/// count = 12
/// patterns_dir = "/boot/patterns"
/// frame_interval_ms = 40
/// auto = true
/// brightness = 31
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLightsConfig {
    /// Number of LEDs in the chain
    pub count: usize,
    /// Directory holding `<name>.png` patterns
    pub patterns_dir: PathBuf,
    /// Time each pattern row stays on screen in auto mode
    pub frame_interval_ms: u64,
    /// Start with auto lights enabled
    pub auto: bool,
    /// APA102 global brightness, 0..=31
    pub brightness: u8,
}

impl Default for FileLightsConfig {
    fn default() -> Self {
        Self {
            count: 12,
            patterns_dir: PathBuf::from("/boot/patterns"),
            frame_interval_ms: 40,
            auto: true,
            brightness: MAX_BRIGHTNESS,
        }
    }
}

impl FileLightsConfig {
    pub(super) fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        if self.count == 0 {
            issues.push(ConfigIssue::warning(
                "lights.count",
                "no LEDs configured, keybow_set_pixel will always fail",
            ));
        }
        if self.frame_interval_ms == 0 {
            issues.push(ConfigIssue::error(
                "lights.frame_interval_ms",
                "must be at least 1",
            ));
        }
        if self.brightness > MAX_BRIGHTNESS {
            issues.push(ConfigIssue::error(
                "lights.brightness",
                format!("{} is above the maximum of {}", self.brightness, MAX_BRIGHTNESS),
            ));
        }
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_out_of_range() {
        let config = FileLightsConfig {
            brightness: 32,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_zero_leds_is_a_warning() {
        let config = FileLightsConfig {
            count: 0,
            ..Default::default()
        };
        let issues = config.validate();
        assert_eq!(issues.len(), 1);
        assert!(!issues[0].is_error());
    }
}
