//! Character to HID usage code translation for `keybow_text`.
//!
//! Only the digits, space and the latin letters are supported. Anything
//! else is reported as [`Keystroke::Unsupported`] and skipped by the caller.

/// HID usage code for `0`.
pub const KEY_0: u8 = 0x27;
/// HID usage code for `1`; `2`..`9` follow consecutively.
pub const KEY_1: u8 = 0x1E;
/// HID usage code for `a`; `b`..`z` follow consecutively.
pub const KEY_A: u8 = 0x04;
/// HID usage code for the space bar.
pub const KEY_SPACE: u8 = 0x2C;

/// Result of translating one input byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Supported { code: u8, shift: bool },
    Unsupported,
}

/// Translate one byte of text into the key that types it.
pub fn translate(byte: u8) -> Keystroke {
    match byte {
        b'1'..=b'9' => Keystroke::Supported {
            code: KEY_1 + (byte - b'1'),
            shift: false,
        },
        b'0' => Keystroke::Supported {
            code: KEY_0,
            shift: false,
        },
        b' ' => Keystroke::Supported {
            code: KEY_SPACE,
            shift: false,
        },
        b'a'..=b'z' => Keystroke::Supported {
            code: KEY_A + (byte - b'a'),
            shift: false,
        },
        b'A'..=b'Z' => Keystroke::Supported {
            code: KEY_A + (byte - b'A'),
            shift: true,
        },
        _ => Keystroke::Unsupported,
    }
}
