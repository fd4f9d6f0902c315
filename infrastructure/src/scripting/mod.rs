//! Lua scripting platform (feature-gated: `scripting`)
//!
//! Provides the `LuaScriptingEngine` that implements `KeypadScriptPort`
//! from the application layer, backed by mlua (Lua 5.4).
//!
//! # Modules
//!
//! - `sandbox`: strips C modules, `io` and process control from the VM
//! - `args`: argument marshaling shared by every host function
//! - `lights_api`: `keybow_set_pixel`, patterns and auto lights
//! - `hid_api`: keys, modifiers, media keys, mouse, text and MIDI
//! - `system_api`: sleeps and the millisecond clock
//! - `io_api`: sandboxed files and the serial link
//! - `lua_engine`: Main engine struct tying everything together

mod args;
mod hid_api;
mod io_api;
mod lights_api;
mod lua_engine;
mod sandbox;
mod system_api;

pub use lua_engine::LuaScriptingEngine;
