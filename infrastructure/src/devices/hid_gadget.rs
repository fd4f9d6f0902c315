//! USB HID gadget writer.

use keybow_application::HidTransportPort;
use keybow_domain::{KeyboardReport, MediaReport, MouseReport};
use std::fs::File;
use std::io::{self, Write};

/// Writes each report to its own gadget node (`/dev/hidgN`).
///
/// A missing node silently drops reports of that kind.
pub struct HidGadget<W: Write + Send = File> {
    keyboard: Option<W>,
    media: Option<W>,
    mouse: Option<W>,
}

impl<W: Write + Send> HidGadget<W> {
    pub fn new(keyboard: Option<W>, media: Option<W>, mouse: Option<W>) -> Self {
        Self {
            keyboard,
            media,
            mouse,
        }
    }

    fn write_report(node: &mut Option<W>, bytes: &[u8]) -> io::Result<()> {
        match node {
            Some(w) => {
                w.write_all(bytes)?;
                w.flush()
            }
            None => Ok(()),
        }
    }
}

impl<W: Write + Send> HidTransportPort for HidGadget<W> {
    fn send_keyboard(&mut self, report: &KeyboardReport) -> io::Result<()> {
        Self::write_report(&mut self.keyboard, &report.to_bytes())
    }

    fn send_media(&mut self, report: &MediaReport) -> io::Result<()> {
        Self::write_report(&mut self.media, &report.to_bytes())
    }

    fn send_mouse(&mut self, report: &MouseReport) -> io::Result<()> {
        Self::write_report(&mut self.mouse, &report.to_bytes())
    }
}
