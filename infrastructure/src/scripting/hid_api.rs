//! `keybow_*` functions that drive the USB gadget: keys, modifiers,
//! media keys, the mouse, text and MIDI.

use keybow_application::HostCapabilities;
use keybow_domain::{HostFunction, MidiNote};
use mlua::prelude::*;

use super::args::register_host_fn;

/// Modifier, media and mouse-button indices address one bit of a byte.
const MAX_BIT_INDEX: u8 = 7;

pub fn register_hid_api(lua: &Lua, host: &HostCapabilities) -> LuaResult<()> {
    // keybow_set_key(code, pressed)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::SetKey, move |_, args| {
            let Some(code) = args.integer::<u8>(0) else {
                return Ok(args.misuse("a key code in 0..=255"));
            };
            let changed = host.hid().set_key(code, args.flag(1));
            Ok(LuaValue::Boolean(changed))
        })?;
    }

    // keybow_set_modifier(index, state)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::SetModifier, move |_, args| {
            let Some(index) = args.integer::<u8>(0).filter(|i| *i <= MAX_BIT_INDEX) else {
                return Ok(args.misuse("a modifier index in 0..=7"));
            };
            let changed = host.hid().set_modifier(index, args.flag(1));
            Ok(LuaValue::Boolean(changed))
        })?;
    }

    // keybow_set_media_key(index, state)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::SetMediaKey, move |_, args| {
            let Some(index) = args.integer::<u8>(0).filter(|i| *i <= MAX_BIT_INDEX) else {
                return Ok(args.misuse("a media key index in 0..=7"));
            };
            let mut hid = host.hid();
            let changed = hid.set_media_key(index, args.flag(1));
            if changed {
                hid.send_media_report();
            }
            Ok(LuaValue::Boolean(changed))
        })?;
    }

    // keybow_set_mousebutton(button, pressed)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::SetMouseButton, move |_, args| {
            let Some(button) = args.integer::<u8>(0).filter(|b| *b <= MAX_BIT_INDEX) else {
                return Ok(args.misuse("a mouse button in 0..=7"));
            };
            let mut hid = host.hid();
            hid.set_mouse_button(button, args.flag(1));
            hid.send_mouse_report();
            Ok(LuaValue::Boolean(true))
        })?;
    }

    // keybow_set_mousemove(dx, dy)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::SetMouseMove, move |_, args| {
            let (Some(dx), Some(dy)) = (args.integer::<i16>(0), args.integer::<i16>(1)) else {
                return Ok(args.misuse("dx and dy in -32768..=32767"));
            };
            let mut hid = host.hid();
            hid.set_mouse_xy(dx, dy);
            hid.send_mouse_report();
            Ok(LuaValue::Boolean(true))
        })?;
    }

    // keybow_text(text)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::Text, move |_, args| {
            let Some(text) = args.bytes(0) else {
                return Ok(args.misuse("a string"));
            };
            host.hid().send_text(&text);
            Ok(LuaValue::Nil)
        })?;
    }

    // keybow_send_midi_note(channel, note, velocity, on)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::SendMidiNote, move |_, args| {
            let (Some(channel), Some(note), Some(velocity)) = (
                args.integer::<u8>(0),
                args.integer::<u8>(1),
                args.integer::<u8>(2),
            ) else {
                return Ok(args.misuse("channel, note and velocity as integers"));
            };
            match MidiNote::new(channel, note, velocity, args.flag(3)) {
                Ok(note) => {
                    host.hid().send_midi_note(note);
                    Ok(LuaValue::Nil)
                }
                Err(e) => Ok(args.misuse(&e.to_string())),
            }
        })?;
    }

    Ok(())
}
