//! `[script]`, `[storage]` and `[tick]` sections

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw script configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScriptConfig {
    /// Path to the Lua script (default: `keys.lua` in the working directory)
    pub path: PathBuf,
}

impl Default for FileScriptConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("keys.lua"),
        }
    }
}

/// Raw storage configuration from TOML
///
/// # Example
///
/// ```toml
/// [storage]
/// root = "/boot"
/// subdir = "user"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Mount point of the storage partition
    pub root: PathBuf,
    /// Directory under `root` that scripts may read and write
    pub subdir: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("/boot"),
            subdir: "user".to_string(),
        }
    }
}

/// Raw tick configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTickConfig {
    /// Period between `tick()` calls in milliseconds
    pub interval_ms: u64,
}

impl Default for FileTickConfig {
    fn default() -> Self {
        Self { interval_ms: 10 }
    }
}
