//! MIDI note messages.

use crate::core::error::DomainError;

const NOTE_ON: u8 = 0x90;
const NOTE_OFF: u8 = 0x80;

/// A validated note-on / note-off message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MidiNote {
    channel: u8,
    note: u8,
    velocity: u8,
    on: bool,
}

impl MidiNote {
    pub fn new(channel: u8, note: u8, velocity: u8, on: bool) -> Result<Self, DomainError> {
        if channel > 0x0F {
            return Err(DomainError::InvalidMidiNote(format!(
                "channel {channel} is outside 0..=15"
            )));
        }
        if note > 0x7F || velocity > 0x7F {
            return Err(DomainError::InvalidMidiNote(format!(
                "note {note} / velocity {velocity} must be within 0..=127"
            )));
        }
        Ok(Self {
            channel,
            note,
            velocity,
            on,
        })
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Three-byte channel voice message.
    pub fn to_bytes(&self) -> [u8; 3] {
        let status = if self.on { NOTE_ON } else { NOTE_OFF };
        [status | self.channel, self.note, self.velocity]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on_and_off_bytes() {
        let on = MidiNote::new(2, 60, 100, true).unwrap();
        assert_eq!(on.to_bytes(), [0x92, 60, 100]);

        let off = MidiNote::new(2, 60, 0, false).unwrap();
        assert_eq!(off.to_bytes(), [0x82, 60, 0]);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(MidiNote::new(16, 60, 100, true).is_err());
        assert!(MidiNote::new(0, 128, 100, true).is_err());
        assert!(MidiNote::new(0, 60, 200, true).is_err());
    }
}
