//! `keybow_*` light functions: pixels, patterns and auto mode.

use keybow_application::HostCapabilities;
use keybow_domain::{HostFunction, KeyIndex, Rgb};
use mlua::prelude::*;

use super::args::register_host_fn;

pub fn register_lights_api(lua: &Lua, host: &HostCapabilities) -> LuaResult<()> {
    // keybow_set_pixel(key, r, g, b)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::SetPixel, move |_, args| {
            let (Some(key), Some(r), Some(g), Some(b)) = (
                args.integer::<u8>(0),
                args.integer::<u8>(1),
                args.integer::<u8>(2),
                args.integer::<u8>(3),
            ) else {
                return Ok(args.misuse("a key index and r, g, b in 0..=255"));
            };
            let written = host
                .lights
                .set_pixel(&host.keys, KeyIndex(key), Rgb::new(r, g, b));
            Ok(LuaValue::Boolean(written))
        })?;
    }

    // keybow_auto_lights(state)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::AutoLights, move |_, args| {
            host.lights.set_auto(args.flag(0));
            Ok(LuaValue::Nil)
        })?;
    }

    // keybow_clear_lights()
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::ClearLights, move |_, _| {
            host.lights.set_all(Rgb::BLACK);
            Ok(LuaValue::Nil)
        })?;
    }

    // keybow_load_pattern(name)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::LoadPattern, move |_, args| {
            let name = match args.store_name(0) {
                Ok(name) => name,
                Err(refusal) => return Ok(refusal),
            };
            let loaded = host.lights.load_pattern(host.patterns.as_ref(), &name);
            Ok(LuaValue::Boolean(loaded))
        })?;
    }

    Ok(())
}
