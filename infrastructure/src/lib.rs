//! Infrastructure layer for keybow-host
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Lua scripting engine, the sandboxed
//! file store, the device nodes, key input and configuration file loading.

pub mod config;
pub mod devices;
pub mod input;
#[cfg(feature = "scripting")]
pub mod scripting;
pub mod storage;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use devices::{
    Apa102Spi, HidGadget, PngPatternLibrary, RawMidi, SerialTty, open_hid, open_lights,
    open_midi, open_serial,
};
pub use input::LineKeySource;
#[cfg(feature = "scripting")]
pub use scripting::LuaScriptingEngine;
pub use storage::SandboxedFileStore;
