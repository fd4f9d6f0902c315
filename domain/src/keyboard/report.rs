//! Fixed-layout HID reports.
//!
//! Keyboard (boot protocol, 8 bytes):
//! ```text
//! Byte 0:   modifier bitfield (bit 0 LCtrl ... bit 7 RGui)
//! Byte 1:   reserved (0x00)
//! Byte 2-7: up to 6 held usage codes, zero padded
//! ```
//!
//! Media (1 byte): bitfield of active media keys.
//!
//! Mouse (4 bytes): buttons, dx, dy, wheel.

/// Number of simultaneous key slots in a keyboard report.
pub const KEY_SLOTS: usize = 6;

/// Keyboard report size in bytes.
pub const KEYBOARD_REPORT_SIZE: usize = 2 + KEY_SLOTS;

/// Standard boot-protocol keyboard report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardReport {
    pub modifiers: u8,
    pub keycodes: [u8; KEY_SLOTS],
}

impl KeyboardReport {
    pub fn to_bytes(&self) -> [u8; KEYBOARD_REPORT_SIZE] {
        let mut buf = [0u8; KEYBOARD_REPORT_SIZE];
        buf[0] = self.modifiers;
        buf[2..].copy_from_slice(&self.keycodes);
        buf
    }

    /// `true` when nothing is held.
    pub fn is_released(&self) -> bool {
        self.modifiers == 0 && self.keycodes.iter().all(|&k| k == 0)
    }
}

/// Media key report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaReport {
    pub keys: u8,
}

impl MediaReport {
    pub fn to_bytes(&self) -> [u8; 1] {
        [self.keys]
    }
}

/// Relative mouse report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseReport {
    pub buttons: u8,
    pub dx: i8,
    pub dy: i8,
    pub wheel: i8,
}

impl MouseReport {
    pub fn to_bytes(&self) -> [u8; 4] {
        [
            self.buttons,
            self.dx.to_le_bytes()[0],
            self.dy.to_le_bytes()[0],
            self.wheel.to_le_bytes()[0],
        ]
    }

    /// `true` when no button is held and there is no movement.
    pub fn is_neutral(&self) -> bool {
        *self == Self::default()
    }
}
