//! `keybow_sleep`, `keybow_usleep` and `keybow_get_millis`.

use keybow_application::TickClock;
use keybow_domain::HostFunction;
use mlua::prelude::*;
use std::thread;
use std::time::Duration;

use super::args::register_host_fn;

pub fn register_system_api(lua: &Lua, clock: TickClock) -> LuaResult<()> {
    // Both sleeps block the whole session, matching the firmware's behaviour.
    register_host_fn(lua, HostFunction::Sleep, |_, args| {
        let Some(ms) = args.integer::<u32>(0) else {
            return Ok(args.misuse("milliseconds as a non-negative integer"));
        };
        thread::sleep(Duration::from_millis(u64::from(ms)));
        Ok(LuaValue::Nil)
    })?;

    register_host_fn(lua, HostFunction::USleep, |_, args| {
        let Some(us) = args.integer::<u32>(0) else {
            return Ok(args.misuse("microseconds as a non-negative integer"));
        };
        thread::sleep(Duration::from_micros(u64::from(us)));
        Ok(LuaValue::Nil)
    })?;

    register_host_fn(lua, HostFunction::GetMillis, move |_, _| {
        let ms = i64::try_from(clock.elapsed_millis()).unwrap_or(i64::MAX);
        Ok(LuaValue::Integer(ms))
    })
}
