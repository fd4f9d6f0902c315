//! HID controller: owns the HID state machine and the HID/MIDI transports.
//!
//! State changes are never flushed implicitly; callers choose when a
//! report goes out. Transport failures are logged and swallowed so a
//! missing gadget never takes the host down.

use keybow_domain::{
    HidState, Keystroke, MODIFIER_LEFT_SHIFT, MidiNote, translate,
};
use tracing::{debug, warn};

use crate::ports::hid_transport::HidTransportPort;
use crate::ports::midi_transport::MidiTransportPort;

pub struct HidController {
    state: HidState,
    transport: Box<dyn HidTransportPort>,
    midi: Box<dyn MidiTransportPort>,
}

impl HidController {
    pub fn new(transport: Box<dyn HidTransportPort>, midi: Box<dyn MidiTransportPort>) -> Self {
        Self {
            state: HidState::new(),
            transport,
            midi,
        }
    }

    pub fn state(&self) -> &HidState {
        &self.state
    }

    pub fn press_key(&mut self, code: u8) -> bool {
        self.state.press_key(code)
    }

    pub fn release_key(&mut self, code: u8) -> bool {
        self.state.release_key(code)
    }

    /// Press or release `code` and flush a keyboard report if that
    /// changed anything.
    pub fn set_key(&mut self, code: u8, pressed: bool) -> bool {
        let changed = if pressed {
            self.state.press_key(code)
        } else {
            self.state.release_key(code)
        };
        debug!(code, pressed, changed, "set_key");
        if changed {
            self.send_hid_report();
        }
        changed
    }

    pub fn toggle_modifier(&mut self, index: u8) -> bool {
        self.state.toggle_modifier(index)
    }

    pub fn set_modifier(&mut self, index: u8, state: bool) -> bool {
        self.state.set_modifier(index, state)
    }

    pub fn set_media_key(&mut self, index: u8, state: bool) -> bool {
        self.state.set_media_key(index, state)
    }

    pub fn set_mouse_button(&mut self, button: u8, state: bool) -> bool {
        self.state.set_mouse_button(button, state)
    }

    pub fn set_mouse_xy(&mut self, dx: i16, dy: i16) {
        self.state.set_mouse_xy(dx, dy);
    }

    /// Write held keys and modifiers as one keyboard report.
    pub fn send_hid_report(&mut self) {
        let report = self.state.keyboard_report();
        if let Err(e) = self.transport.send_keyboard(&report) {
            warn!("Failed to send keyboard report: {}", e);
        }
    }

    pub fn send_media_report(&mut self) {
        let report = self.state.media_report();
        if let Err(e) = self.transport.send_media(&report) {
            warn!("Failed to send media report: {}", e);
        }
    }

    /// Write the mouse state; pending movement is consumed.
    pub fn send_mouse_report(&mut self) {
        let report = self.state.take_mouse_report();
        if let Err(e) = self.transport.send_mouse(&report) {
            warn!("Failed to send mouse report: {}", e);
        }
    }

    pub fn send_midi_note(&mut self, note: MidiNote) {
        if let Err(e) = self.midi.send_note(&note) {
            warn!("Failed to send MIDI note: {}", e);
        }
    }

    /// Type `text` one character at a time.
    ///
    /// Each supported byte produces a press report and a release report.
    /// Unsupported bytes are skipped. Returns the number of characters typed.
    pub fn send_text(&mut self, text: &[u8]) -> usize {
        let mut typed = 0;
        for &byte in text {
            let Keystroke::Supported { code, shift } = translate(byte) else {
                continue;
            };
            if shift {
                self.state.toggle_modifier(MODIFIER_LEFT_SHIFT);
            }
            self.state.press_key(code);
            self.send_hid_report();
            self.state.release_key(code);
            self.send_hid_report();
            if shift {
                self.state.toggle_modifier(MODIFIER_LEFT_SHIFT);
            }
            typed += 1;
        }
        typed
    }

    /// Release everything and flush one keyboard and one mouse report.
    pub fn shutdown(&mut self) {
        self.state.release_all();
        self.send_hid_report();
        self.send_mouse_report();
    }
}
