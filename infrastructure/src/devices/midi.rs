//! Raw MIDI output.

use keybow_application::MidiTransportPort;
use keybow_domain::MidiNote;
use std::fs::File;
use std::io::{self, Write};

/// Writes 3-byte note messages to a raw MIDI device (`/dev/snd/midiCxDy`).
pub struct RawMidi<W: Write + Send = File> {
    out: W,
}

impl<W: Write + Send> RawMidi<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write + Send> MidiTransportPort for RawMidi<W> {
    fn send_note(&mut self, note: &MidiNote) -> io::Result<()> {
        self.out.write_all(&note.to_bytes())?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on_then_off() {
        let mut midi = RawMidi::new(Vec::new());
        midi.send_note(&MidiNote::new(2, 64, 90, true).unwrap()).unwrap();
        midi.send_note(&MidiNote::new(2, 64, 0, false).unwrap()).unwrap();
        assert_eq!(midi.out, vec![0x92, 64, 90, 0x82, 64, 0]);
    }
}
