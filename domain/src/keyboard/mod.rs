//! Keyboard, media and mouse HID concepts.
//!
//! - [`keycode`]: byte → scan code transliteration for text entry
//! - [`report`]: fixed-layout reports written to the HID gadget
//! - [`state`]: the press/release state machine behind those reports
//! - [`midi`]: validated MIDI note messages

pub mod keycode;
pub mod midi;
pub mod report;
pub mod state;
