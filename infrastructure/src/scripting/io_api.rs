//! `keybow_file_*` and `keybow_serial_*`: byte-oriented I/O for scripts.

use keybow_application::HostCapabilities;
use keybow_domain::{HostFunction, StoreLookup};
use mlua::prelude::*;
use tracing::warn;

use super::args::register_host_fn;

pub fn register_io_api(lua: &Lua, host: &HostCapabilities) -> LuaResult<()> {
    // keybow_file_save(name, contents)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::FileSave, move |_, args| {
            let name = match args.store_name(0) {
                Ok(name) => name,
                Err(refusal) => return Ok(refusal),
            };
            let Some(contents) = args.bytes(1) else {
                return Ok(args.misuse("string contents"));
            };
            Ok(LuaValue::Boolean(host.files.save(&name, &contents)))
        })?;
    }

    // keybow_file_load(name)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::FileLoad, move |lua, args| {
            let name = match args.store_name(0) {
                Ok(name) => name,
                Err(refusal) => return Ok(refusal),
            };
            match host.files.load(&name) {
                StoreLookup::Found(bytes) => Ok(LuaValue::String(lua.create_string(&bytes)?)),
                StoreLookup::NotFound => Ok(LuaValue::Nil),
            }
        })?;
    }

    // keybow_serial_write(data)
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::SerialWrite, move |_, args| {
            let Some(data) = args.bytes(0) else {
                return Ok(args.misuse("a string"));
            };
            let written = match host.serial().write(&data) {
                Ok(n) => n,
                Err(e) => {
                    warn!("Serial write failed: {}", e);
                    0
                }
            };
            Ok(LuaValue::Integer(written as i64))
        })?;
    }

    // keybow_serial_read()
    {
        let host = host.clone();
        register_host_fn(lua, HostFunction::SerialRead, move |lua, _| {
            let data = match host.serial().read() {
                Ok(data) => data,
                Err(e) => {
                    warn!("Serial read failed: {}", e);
                    Vec::new()
                }
            };
            Ok(LuaValue::String(lua.create_string(&data)?))
        })?;
    }

    Ok(())
}
