//! HID press/release state machine.
//!
//! Tracks held keys, modifiers, media keys and the mouse. Every mutator
//! returns whether the state actually changed; nothing here writes to a
//! device. Callers decide when to turn the state into reports.

use super::report::{KEY_SLOTS, KeyboardReport, MediaReport, MouseReport};

/// Number of addressable bits in the modifier, media and button masks.
pub const MASK_BITS: u8 = 8;

/// Modifier index of left shift, used by text entry.
pub const MODIFIER_LEFT_SHIFT: u8 = 1;

/// Current mouse buttons and pending relative movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MouseState {
    pub buttons: u8,
    pub dx: i16,
    pub dy: i16,
}

#[derive(Debug, Clone, Default)]
pub struct HidState {
    held: Vec<u8>,
    modifiers: u8,
    media: u8,
    mouse: MouseState,
}

impl HidState {
    pub fn new() -> Self {
        Self {
            held: Vec::with_capacity(KEY_SLOTS),
            ..Self::default()
        }
    }

    /// Add `code` to the held set.
    ///
    /// Code 0 is the report's empty-slot marker and is never held. A press
    /// while all slots are taken is dropped.
    pub fn press_key(&mut self, code: u8) -> bool {
        if code == 0 || self.is_pressed(code) || self.held.len() >= KEY_SLOTS {
            return false;
        }
        self.held.push(code);
        true
    }

    pub fn release_key(&mut self, code: u8) -> bool {
        match self.held.iter().position(|&held| held == code) {
            Some(pos) => {
                self.held.remove(pos);
                true
            }
            None => false,
        }
    }

    pub fn is_pressed(&self, code: u8) -> bool {
        self.held.contains(&code)
    }

    /// Held codes in press order.
    pub fn held_keys(&self) -> &[u8] {
        &self.held
    }

    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    pub fn media_keys(&self) -> u8 {
        self.media
    }

    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    pub fn toggle_modifier(&mut self, index: u8) -> bool {
        if index >= MASK_BITS {
            return false;
        }
        self.modifiers ^= 1 << index;
        true
    }

    pub fn set_modifier(&mut self, index: u8, state: bool) -> bool {
        set_bit(&mut self.modifiers, index, state)
    }

    pub fn set_media_key(&mut self, index: u8, state: bool) -> bool {
        set_bit(&mut self.media, index, state)
    }

    pub fn set_mouse_button(&mut self, button: u8, state: bool) -> bool {
        set_bit(&mut self.mouse.buttons, button, state)
    }

    /// Replace the pending relative movement.
    pub fn set_mouse_xy(&mut self, dx: i16, dy: i16) {
        self.mouse.dx = dx;
        self.mouse.dy = dy;
    }

    pub fn keyboard_report(&self) -> KeyboardReport {
        let mut keycodes = [0u8; KEY_SLOTS];
        for (slot, code) in keycodes.iter_mut().zip(&self.held) {
            *slot = *code;
        }
        KeyboardReport {
            modifiers: self.modifiers,
            keycodes,
        }
    }

    pub fn media_report(&self) -> MediaReport {
        MediaReport { keys: self.media }
    }

    /// Build a mouse report and reset movement to neutral. Buttons persist.
    pub fn take_mouse_report(&mut self) -> MouseReport {
        let report = MouseReport {
            buttons: self.mouse.buttons,
            dx: clamp_axis(self.mouse.dx),
            dy: clamp_axis(self.mouse.dy),
            wheel: 0,
        };
        self.mouse.dx = 0;
        self.mouse.dy = 0;
        report
    }

    /// Drop every held key, modifier, media key and mouse button.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.modifiers = 0;
        self.media = 0;
        self.mouse = MouseState::default();
    }
}

fn set_bit(mask: &mut u8, index: u8, state: bool) -> bool {
    if index >= MASK_BITS {
        return false;
    }
    let before = *mask;
    if state {
        *mask |= 1 << index;
    } else {
        *mask &= !(1 << index);
    }
    *mask != before
}

fn clamp_axis(value: i16) -> i8 {
    // -128 is avoided; boot mice treat the axis as symmetric.
    value.clamp(-127, 127) as i8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_is_idempotent() {
        let mut state = HidState::new();
        assert!(state.press_key(0x04));
        let before = state.keyboard_report();

        assert!(!state.press_key(0x04));
        assert_eq!(state.held_keys(), &[0x04]);
        assert_eq!(state.keyboard_report(), before);
    }

    #[test]
    fn test_release_unheld_is_unchanged() {
        let mut state = HidState::new();
        assert!(!state.release_key(0x04));
        state.press_key(0x05);
        assert!(!state.release_key(0x04));
        assert!(state.release_key(0x05));
        assert!(state.held_keys().is_empty());
    }

    #[test]
    fn test_held_set_is_bounded() {
        let mut state = HidState::new();
        for code in 0x04..0x04 + KEY_SLOTS as u8 {
            assert!(state.press_key(code));
        }
        assert!(!state.press_key(0x20));
        assert_eq!(state.held_keys().len(), KEY_SLOTS);
        assert!(!state.is_pressed(0x20));
    }

    #[test]
    fn test_zero_code_is_never_held() {
        let mut state = HidState::new();
        assert!(!state.press_key(0));
        assert!(state.held_keys().is_empty());
    }

    #[test]
    fn test_report_keeps_press_order() {
        let mut state = HidState::new();
        state.press_key(0x10);
        state.press_key(0x05);
        state.press_key(0x07);
        state.release_key(0x05);
        assert_eq!(
            state.keyboard_report().keycodes,
            [0x10, 0x07, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_modifier_toggle_and_set() {
        let mut state = HidState::new();
        assert!(state.toggle_modifier(MODIFIER_LEFT_SHIFT));
        assert_eq!(state.modifiers(), 0x02);
        assert!(!state.set_modifier(1, true));
        assert!(state.set_modifier(0, true));
        assert_eq!(state.modifiers(), 0x03);
        assert!(state.toggle_modifier(1));
        assert_eq!(state.modifiers(), 0x01);
        assert!(!state.toggle_modifier(8));
        assert!(!state.set_modifier(9, true));
    }

    #[test]
    fn test_media_keys() {
        let mut state = HidState::new();
        assert!(state.set_media_key(3, true));
        assert!(!state.set_media_key(3, true));
        assert_eq!(state.media_report().keys, 0x08);
        assert!(state.set_media_key(3, false));
        assert_eq!(state.media_keys(), 0);
    }

    #[test]
    fn test_mouse_movement_resets_but_buttons_persist() {
        let mut state = HidState::new();
        state.set_mouse_button(0, true);
        state.set_mouse_xy(-300, 12);

        let report = state.take_mouse_report();
        assert_eq!(report.buttons, 0x01);
        assert_eq!(report.dx, -127);
        assert_eq!(report.dy, 12);

        let next = state.take_mouse_report();
        assert_eq!(next.buttons, 0x01);
        assert_eq!((next.dx, next.dy), (0, 0));
    }

    #[test]
    fn test_release_all() {
        let mut state = HidState::new();
        state.press_key(0x04);
        state.set_modifier(1, true);
        state.set_media_key(0, true);
        state.set_mouse_button(1, true);

        state.release_all();

        assert!(state.keyboard_report().is_released());
        assert_eq!(state.media_keys(), 0);
        assert!(state.take_mouse_report().is_neutral());
    }
}
