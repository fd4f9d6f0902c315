//! Application layer for keybow-host
//!
//! This crate contains the ports to every external collaborator and the
//! services built on them: the HID controller, the light-buffer arbiter,
//! the tick clock and the device loop. It depends only on the domain layer.

pub mod clock;
pub mod hid;
pub mod host;
pub mod lights;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use clock::TickClock;
pub use hid::HidController;
pub use host::HostCapabilities;
pub use lights::{AutoLights, LightArbiter};
pub use ports::{
    file_store::FileStorePort,
    hid_transport::{HidTransportPort, NullHidTransport},
    light_driver::{LightDriverPort, NullLightDriver},
    midi_transport::{MidiTransportPort, NullMidiTransport},
    pattern_source::{NoPatterns, PatternError, PatternSourcePort},
    scripting_engine::{KeypadScriptPort, NoScriptingEngine, ScriptError},
    serial::{NullSerialPort, SerialPort},
};
pub use use_cases::DeviceLoop;
