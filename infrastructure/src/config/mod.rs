//! Configuration file loading for keybow-host
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment: `KEYBOW_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./keybow.toml` or `./.keybow.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/keybow/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileDevicesConfig, FileKeyConfig, FileLightsConfig, FileScriptConfig,
    FileStorageConfig, FileTickConfig,
};
pub use loader::ConfigLoader;
