//! Physical keys and their configuration.
//!
//! A [`KeyTable`] is fixed at start-up. Each key knows which LED sits
//! under it and, optionally, which scan code the host emits when the
//! script leaves the key unhandled.

use crate::core::error::DomainError;
use std::fmt;
use std::str::FromStr;

/// Index of a physical key, as seen by scripts (`handle_key_NN`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyIndex(pub u8);

impl KeyIndex {
    /// Name of the Lua function that handles this key, e.g. `handle_key_03`.
    pub fn handler_name(&self) -> String {
        format!("handle_key_{:02}", self.0)
    }
}

impl fmt::Display for KeyIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyDef {
    pub index: KeyIndex,
    pub led_index: usize,
    pub hid_code: Option<u8>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyTable {
    keys: Vec<KeyDef>,
}

impl KeyTable {
    /// Build a table. Later duplicates of an index are dropped.
    pub fn new(keys: impl IntoIterator<Item = KeyDef>) -> Self {
        let mut table: Vec<KeyDef> = Vec::new();
        for key in keys {
            if !table.iter().any(|k| k.index == key.index) {
                table.push(key);
            }
        }
        Self { keys: table }
    }

    /// The twelve-key layout: LEDs in key order and a numeric pad as
    /// fallback codes (`0 . Enter 1 2 3 4 5 6 7 8 9`).
    pub fn keybow_default() -> Self {
        const CODES: [u8; 12] = [
            0x27, 0x37, 0x28, 0x1E, 0x1F, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26,
        ];
        Self::new(CODES.iter().enumerate().map(|(i, &code)| KeyDef {
            index: KeyIndex(i as u8),
            led_index: i,
            hid_code: Some(code),
        }))
    }

    pub fn get(&self, index: KeyIndex) -> Option<&KeyDef> {
        self.keys.iter().find(|k| k.index == index)
    }

    pub fn led_for(&self, index: KeyIndex) -> Option<usize> {
        self.get(index).map(|k| k.led_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyDef> {
        self.keys.iter()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// A key transition reported by the input side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub index: KeyIndex,
    pub pressed: bool,
}

impl FromStr for KeyEvent {
    type Err = DomainError;

    /// Parse `"<index> <state>"`, e.g. `"3 down"` or `"11 0"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let (Some(index), Some(state), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(DomainError::InvalidKeyEvent(format!(
                "expected '<index> <state>', got '{s}'"
            )));
        };

        let index = index
            .parse::<u8>()
            .map_err(|_| DomainError::InvalidKeyEvent(format!("bad key index '{index}'")))?;

        let pressed = match state.to_ascii_lowercase().as_str() {
            "1" | "down" | "press" | "true" => true,
            "0" | "up" | "release" | "false" => false,
            other => {
                return Err(DomainError::InvalidKeyEvent(format!(
                    "bad key state '{other}'"
                )));
            }
        };

        Ok(Self {
            index: KeyIndex(index),
            pressed,
        })
    }
}
