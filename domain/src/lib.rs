//! Domain layer for keybow-host
//!
//! This crate contains the device-independent rules of a scriptable
//! macro keypad. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! - **Keys**: a fixed [`KeyTable`] maps key indices to LEDs and fallback codes
//! - **HID state**: [`HidState`] tracks held keys, modifiers, media keys and
//!   the mouse, and builds the fixed-layout reports
//! - **Lights**: a [`LightBuffer`] of [`Rgb`] pixels, bulk-loadable from a [`Pattern`]
//! - **Storage**: [`StoreName`] is a sandbox-safe name for the script file store
//! - **Scripting**: the fixed [`HostFunction`] table exposed to scripts

pub mod config;
pub mod core;
pub mod keyboard;
pub mod keys;
pub mod lights;
pub mod scripting;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigIssue, Severity};
pub use core::error::DomainError;
pub use keyboard::{
    keycode::{Keystroke, translate},
    midi::MidiNote,
    report::{KEY_SLOTS, KeyboardReport, MediaReport, MouseReport},
    state::{HidState, MODIFIER_LEFT_SHIFT, MouseState},
};
pub use keys::{KeyDef, KeyEvent, KeyIndex, KeyTable};
pub use lights::{LightBuffer, Pattern, Rgb};
pub use scripting::{HostFunction, KeyDispatch, SETUP_CALLBACK, TICK_CALLBACK};
pub use storage::{StoreLookup, StoreName};
