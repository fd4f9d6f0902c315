//! Capabilities the host hands to a script session.
//!
//! Everything a host function may touch is reachable from here and
//! nothing else is. The bundle is cheap to clone; clones share devices.

use keybow_domain::KeyTable;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::hid::HidController;
use crate::lights::LightArbiter;
use crate::ports::file_store::FileStorePort;
use crate::ports::pattern_source::PatternSourcePort;
use crate::ports::serial::SerialPort;

#[derive(Clone)]
pub struct HostCapabilities {
    pub keys: Arc<KeyTable>,
    pub hid: Arc<Mutex<HidController>>,
    pub lights: Arc<LightArbiter>,
    pub patterns: Arc<dyn PatternSourcePort>,
    pub files: Arc<dyn FileStorePort>,
    pub serial: Arc<Mutex<dyn SerialPort>>,
}

impl HostCapabilities {
    /// Lock the HID controller.
    ///
    /// Poisoning is ignored: the controller holds plain state that a
    /// panicking caller cannot leave half-written.
    pub fn hid(&self) -> MutexGuard<'_, HidController> {
        self.hid.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn serial(&self) -> MutexGuard<'_, dyn SerialPort + 'static> {
        self.serial.lock().unwrap_or_else(|e| e.into_inner())
    }
}
