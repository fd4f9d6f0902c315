//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to domain types on use.

mod devices;
mod keys;
mod lights;
mod runtime;

pub use devices::FileDevicesConfig;
pub use keys::FileKeyConfig;
pub use lights::FileLightsConfig;
pub use runtime::{FileScriptConfig, FileStorageConfig, FileTickConfig};

use keybow_domain::{ConfigIssue, KeyTable, StoreName};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Which script to run
    pub script: FileScriptConfig,
    /// Where `keybow_file_*` keeps its files
    pub storage: FileStorageConfig,
    /// LED chain and patterns
    pub lights: FileLightsConfig,
    /// Script tick rate
    pub tick: FileTickConfig,
    /// Device node paths
    pub devices: FileDevicesConfig,
    /// Key layout; empty means the stock twelve-key layout
    pub keys: Vec<FileKeyConfig>,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Issues with [`Severity::Error`](keybow_domain::Severity::Error)
    /// make the configuration unusable.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.script.path.as_os_str().is_empty() {
            issues.push(ConfigIssue::error("script.path", "must not be empty"));
        }

        if let Err(e) = StoreName::parse(&self.storage.subdir) {
            issues.push(ConfigIssue::error("storage.subdir", e.to_string()));
        }

        issues.extend(self.lights.validate());

        if self.tick.interval_ms == 0 {
            issues.push(ConfigIssue::error("tick.interval_ms", "must be at least 1"));
        }

        let mut seen = HashSet::new();
        for key in &self.keys {
            if !seen.insert(key.index) {
                issues.push(ConfigIssue::error(
                    "keys",
                    format!("key {} is defined more than once", key.index),
                ));
            }
            let led = key.led_index();
            if led >= self.lights.count {
                issues.push(ConfigIssue::error(
                    "keys",
                    format!(
                        "key {} uses LED {} but only {} LEDs are configured",
                        key.index, led, self.lights.count
                    ),
                ));
            }
        }

        issues
    }

    /// The key layout as a domain table.
    pub fn key_table(&self) -> KeyTable {
        if self.keys.is_empty() {
            KeyTable::keybow_default()
        } else {
            KeyTable::new(self.keys.iter().map(FileKeyConfig::to_key_def))
        }
    }
}
