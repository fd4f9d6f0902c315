//! Key layout from TOML (`[[keys]]` array)

use keybow_domain::{KeyDef, KeyIndex};
use serde::{Deserialize, Serialize};

/// One physical key
///
/// # Example
///
/// ```toml
/// [[keys]]
/// index = 0
/// led = 3
/// hid_code = 0x27
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileKeyConfig {
    /// Key index as seen by `handle_key_NN`
    pub index: u8,
    /// LED under the key (default: same as `index`)
    #[serde(default)]
    pub led: Option<usize>,
    /// Scan code sent when the script does not handle the key
    #[serde(default)]
    pub hid_code: Option<u8>,
}

impl FileKeyConfig {
    pub fn led_index(&self) -> usize {
        self.led.unwrap_or(usize::from(self.index))
    }

    pub fn to_key_def(&self) -> KeyDef {
        KeyDef {
            index: KeyIndex(self.index),
            led_index: self.led_index(),
            hid_code: self.hid_code,
        }
    }
}
