//! Device adapters for the keypad's character devices.
//!
//! Each adapter implements one application-layer port. The `open_*`
//! functions never fail: a device that is not configured, or that cannot
//! be opened, is replaced by the port's null implementation so the
//! script keeps running with that output disabled.

mod apa102;
mod hid_gadget;
mod midi;
mod patterns;
mod serial;

pub use apa102::{APA102_MAX_BRIGHTNESS, Apa102Spi, encode_apa102_frame};
pub use hid_gadget::HidGadget;
pub use midi::RawMidi;
pub use patterns::PngPatternLibrary;
pub use serial::{SERIAL_READ_CHUNK, SerialTty};

use crate::config::FileDevicesConfig;
use keybow_application::{
    HidTransportPort, LightDriverPort, MidiTransportPort, NullHidTransport, NullLightDriver,
    NullMidiTransport, NullSerialPort, SerialPort,
};
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

/// Open `path` for `role`, logging and returning `None` on failure.
fn open_device(
    role: &str,
    path: Option<&Path>,
    open: impl FnOnce(&Path) -> io::Result<File>,
) -> Option<File> {
    let Some(path) = path else {
        debug!(role, "No device configured");
        return None;
    };
    match open(path) {
        Ok(file) => {
            info!(role, "Opened {}", path.display());
            Some(file)
        }
        Err(e) => {
            warn!(role, "Couldn't open {}: {}; continuing without it", path.display(), e);
            None
        }
    }
}

fn open_write(path: &Path) -> io::Result<File> {
    OpenOptions::new().write(true).open(path)
}

/// HID gadget for whichever report nodes opened, or a null transport.
pub fn open_hid(devices: &FileDevicesConfig) -> Box<dyn HidTransportPort> {
    let keyboard = open_device("keyboard", devices.keyboard.as_deref(), open_write);
    let media = open_device("media", devices.media.as_deref(), open_write);
    let mouse = open_device("mouse", devices.mouse.as_deref(), open_write);
    if keyboard.is_none() && media.is_none() && mouse.is_none() {
        return Box::new(NullHidTransport);
    }
    Box::new(HidGadget::new(keyboard, media, mouse))
}

pub fn open_midi(devices: &FileDevicesConfig) -> Box<dyn MidiTransportPort> {
    match open_device("midi", devices.midi.as_deref(), open_write) {
        Some(file) => Box::new(RawMidi::new(file)),
        None => Box::new(NullMidiTransport),
    }
}

pub fn open_serial(devices: &FileDevicesConfig) -> Arc<Mutex<dyn SerialPort>> {
    match open_device("serial", devices.serial.as_deref(), SerialTty::<File>::open_nonblocking) {
        Some(file) => Arc::new(Mutex::new(SerialTty::new(file))),
        None => Arc::new(Mutex::new(NullSerialPort)),
    }
}

pub fn open_lights(devices: &FileDevicesConfig, brightness: u8) -> Box<dyn LightDriverPort> {
    match open_device("spi", devices.spi.as_deref(), open_write) {
        Some(file) => Box::new(Apa102Spi::new(file, brightness)),
        None => Box::new(NullLightDriver),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keybow_domain::{KeyboardReport, MidiNote};
    use std::path::PathBuf;

    fn no_devices() -> FileDevicesConfig {
        FileDevicesConfig {
            keyboard: None,
            media: None,
            mouse: None,
            midi: None,
            serial: None,
            spi: None,
        }
    }

    #[test]
    fn test_unset_devices_fall_back_to_null() {
        let devices = no_devices();
        let mut hid = open_hid(&devices);
        assert!(hid.send_keyboard(&KeyboardReport::default()).is_ok());
        let mut midi = open_midi(&devices);
        assert!(midi.send_note(&MidiNote::new(0, 60, 1, true).unwrap()).is_ok());
        let serial = open_serial(&devices);
        assert!(serial.lock().unwrap().read().unwrap().is_empty());
    }

    #[test]
    fn test_unopenable_device_falls_back_to_null() {
        let mut devices = no_devices();
        devices.spi = Some(PathBuf::from("/nonexistent/spidev9.9"));
        let mut lights = open_lights(&devices, 31);
        assert!(lights.show(&[]).is_ok());
    }

    #[test]
    fn test_regular_file_works_as_gadget_node() {
        let dir = tempfile::tempdir().unwrap();
        let node = dir.path().join("hidg0");
        File::create(&node).unwrap();

        let mut devices = no_devices();
        devices.keyboard = Some(node.clone());
        let mut hid = open_hid(&devices);
        hid.send_keyboard(&KeyboardReport::default()).unwrap();
        assert_eq!(std::fs::read(&node).unwrap().len(), 8);
    }
}
