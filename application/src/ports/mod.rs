//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! Each device port ships a `Null*` implementation used when the matching
//! hardware is absent.

pub mod file_store;
pub mod hid_transport;
pub mod light_driver;
pub mod midi_transport;
pub mod pattern_source;
pub mod scripting_engine;
pub mod serial;
