//! Device node configuration from TOML (`[devices]` section)
//!
//! An unset path means the device is absent and its null adapter is used.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw device configuration from TOML
///
/// # Example
///
/// ```toml
/// [devices]
/// keyboard = "/dev/hidg0"
/// media = "/dev/hidg1"
/// mouse = "/dev/hidg2"
/// midi = "/dev/snd/midiC1D0"
/// serial = "/dev/ttyGS0"
/// spi = "/dev/spidev0.0"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDevicesConfig {
    /// HID gadget node for keyboard reports
    pub keyboard: Option<PathBuf>,
    /// HID gadget node for media key reports
    pub media: Option<PathBuf>,
    /// HID gadget node for mouse reports
    pub mouse: Option<PathBuf>,
    /// Raw MIDI device
    pub midi: Option<PathBuf>,
    /// Serial gadget tty
    pub serial: Option<PathBuf>,
    /// spidev node driving the APA102 chain
    pub spi: Option<PathBuf>,
}

impl Default for FileDevicesConfig {
    fn default() -> Self {
        Self {
            keyboard: Some(PathBuf::from("/dev/hidg0")),
            media: None,
            mouse: None,
            midi: None,
            serial: None,
            spi: Some(PathBuf::from("/dev/spidev0.0")),
        }
    }
}
