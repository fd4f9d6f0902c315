//! HID transport port
//!
//! Defines where serialized keyboard, media and mouse reports go.

use keybow_domain::{KeyboardReport, MediaReport, MouseReport};
use std::io;

/// Port for the USB HID gadget.
///
/// Implementations write one report per call and must not buffer:
/// the host relies on each call reaching the device in order.
pub trait HidTransportPort: Send {
    fn send_keyboard(&mut self, report: &KeyboardReport) -> io::Result<()>;

    fn send_media(&mut self, report: &MediaReport) -> io::Result<()>;

    fn send_mouse(&mut self, report: &MouseReport) -> io::Result<()>;
}

/// Transport that discards every report.
pub struct NullHidTransport;

impl HidTransportPort for NullHidTransport {
    fn send_keyboard(&mut self, _report: &KeyboardReport) -> io::Result<()> {
        Ok(())
    }

    fn send_media(&mut self, _report: &MediaReport) -> io::Result<()> {
        Ok(())
    }

    fn send_mouse(&mut self, _report: &MouseReport) -> io::Result<()> {
        Ok(())
    }
}
