//! MIDI transport port

use keybow_domain::MidiNote;
use std::io;

pub trait MidiTransportPort: Send {
    fn send_note(&mut self, note: &MidiNote) -> io::Result<()>;
}

pub struct NullMidiTransport;

impl MidiTransportPort for NullMidiTransport {
    fn send_note(&mut self, _note: &MidiNote) -> io::Result<()> {
        Ok(())
    }
}
