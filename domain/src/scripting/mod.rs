//! Scripting domain types
//!
//! Names the fixed set of host functions a control script can call and the
//! callbacks the host looks up in the script. These types are
//! runtime-agnostic; the actual Lua runtime lives in the infrastructure
//! layer behind `KeypadScriptPort`.

use crate::core::error::DomainError;

/// Called once after the script has loaded.
pub const SETUP_CALLBACK: &str = "setup";
/// Called on every host tick with the elapsed milliseconds.
pub const TICK_CALLBACK: &str = "tick";

/// Functions the host registers into the script namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HostFunction {
    SetPixel,
    AutoLights,
    ClearLights,
    LoadPattern,
    SetKey,
    SetMouseButton,
    SetMouseMove,
    Text,
    Sleep,
    USleep,
    SetModifier,
    SetMediaKey,
    SendMidiNote,
    GetMillis,
    FileSave,
    FileLoad,
    SerialWrite,
    SerialRead,
}

impl HostFunction {
    pub const ALL: [HostFunction; 18] = [
        Self::SetPixel,
        Self::AutoLights,
        Self::ClearLights,
        Self::LoadPattern,
        Self::SetKey,
        Self::SetMouseButton,
        Self::SetMouseMove,
        Self::Text,
        Self::Sleep,
        Self::USleep,
        Self::SetModifier,
        Self::SetMediaKey,
        Self::SendMidiNote,
        Self::GetMillis,
        Self::FileSave,
        Self::FileLoad,
        Self::SerialWrite,
        Self::SerialRead,
    ];

    /// Global name in the script namespace.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SetPixel => "keybow_set_pixel",
            Self::AutoLights => "keybow_auto_lights",
            Self::ClearLights => "keybow_clear_lights",
            Self::LoadPattern => "keybow_load_pattern",
            Self::SetKey => "keybow_set_key",
            Self::SetMouseButton => "keybow_set_mousebutton",
            Self::SetMouseMove => "keybow_set_mousemove",
            Self::Text => "keybow_text",
            Self::Sleep => "keybow_sleep",
            Self::USleep => "keybow_usleep",
            Self::SetModifier => "keybow_set_modifier",
            Self::SetMediaKey => "keybow_set_media_key",
            Self::SendMidiNote => "keybow_send_midi_note",
            Self::GetMillis => "keybow_get_millis",
            Self::FileSave => "keybow_file_save",
            Self::FileLoad => "keybow_file_load",
            Self::SerialWrite => "keybow_serial_write",
            Self::SerialRead => "keybow_serial_read",
        }
    }

    /// Number of leading arguments that must be present.
    ///
    /// Trailing boolean flags are optional and read with Lua truthiness.
    pub fn required_args(&self) -> usize {
        match self {
            Self::SetPixel => 4,
            Self::SendMidiNote => 3,
            Self::SetMouseMove | Self::FileSave => 2,
            Self::LoadPattern
            | Self::SetKey
            | Self::SetMouseButton
            | Self::Text
            | Self::Sleep
            | Self::USleep
            | Self::SetModifier
            | Self::SetMediaKey
            | Self::FileLoad
            | Self::SerialWrite => 1,
            Self::AutoLights | Self::ClearLights | Self::GetMillis | Self::SerialRead => 0,
        }
    }

    /// Whether misuse is signalled with `nil` instead of `false`.
    pub fn returns_data(&self) -> bool {
        matches!(self, Self::FileLoad)
    }
}

impl std::str::FromStr for HostFunction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| DomainError::UnknownHostFunction(s.to_string()))
    }
}

impl std::fmt::Display for HostFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a key event reached a script handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDispatch {
    Handled,
    /// No handler exists; the host may apply its own fallback.
    NotHandled,
}
