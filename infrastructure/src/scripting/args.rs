//! Typed marshaling of host-function arguments.
//!
//! Scripts are untrusted, so every host function receives its raw
//! arguments and converts them here. Conversion never raises a Lua error:
//! a missing or out-of-range argument is *misuse*, which is logged and
//! answered with `false` (or `nil` for functions that return data).

use keybow_domain::{HostFunction, StoreName};
use mlua::prelude::*;
use tracing::warn;

pub(super) struct HostArgs {
    function: HostFunction,
    values: Vec<LuaValue>,
}

impl HostArgs {
    fn new(function: HostFunction, args: LuaMultiValue) -> Self {
        Self {
            function,
            values: args.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Integer argument converted to `T`.
    ///
    /// Floats are truncated toward zero; values that do not fit `T` and
    /// non-numbers (including numeric strings) yield `None`.
    pub fn integer<T: TryFrom<i64>>(&self, pos: usize) -> Option<T> {
        let raw = match self.values.get(pos)? {
            LuaValue::Integer(n) => *n,
            LuaValue::Number(n) if n.is_finite() => n.trunc() as i64,
            _ => return None,
        };
        T::try_from(raw).ok()
    }

    /// Boolean argument with Lua truthiness; an absent argument is `false`.
    pub fn flag(&self, pos: usize) -> bool {
        !matches!(
            self.values.get(pos),
            None | Some(LuaValue::Nil) | Some(LuaValue::Boolean(false))
        )
    }

    /// Raw bytes of a string argument.
    pub fn bytes(&self, pos: usize) -> Option<Vec<u8>> {
        match self.values.get(pos)? {
            LuaValue::String(s) => Some(s.as_bytes().to_vec()),
            _ => None,
        }
    }

    /// UTF-8 string argument.
    pub fn text(&self, pos: usize) -> Option<String> {
        self.bytes(pos).and_then(|b| String::from_utf8(b).ok())
    }

    /// File or pattern name, validated before any filesystem access.
    ///
    /// On failure the error holds the value to hand back to the script.
    pub fn store_name(&self, pos: usize) -> Result<StoreName, LuaValue> {
        let Some(raw) = self.text(pos) else {
            return Err(self.misuse("a name string"));
        };
        StoreName::parse(&raw).map_err(|e| {
            warn!(
                function = self.function.as_str(),
                sandbox = e.is_sandbox_violation(),
                "Rejected name: {}",
                e
            );
            self.failure()
        })
    }

    /// Log a misuse and produce the value the script sees.
    pub fn misuse(&self, expected: &str) -> LuaValue {
        warn!(
            function = self.function.as_str(),
            "Ignoring call to {}: expected {}",
            self.function,
            expected
        );
        self.failure()
    }

    fn failure(&self) -> LuaValue {
        if self.function.returns_data() {
            LuaValue::Nil
        } else {
            LuaValue::Boolean(false)
        }
    }
}

/// Register `handler` as the global named by `function`.
///
/// Calls with fewer than the required number of arguments are rejected
/// before `handler` runs. Extra arguments are ignored.
pub(super) fn register_host_fn<F>(lua: &Lua, function: HostFunction, handler: F) -> LuaResult<()>
where
    F: Fn(&Lua, HostArgs) -> LuaResult<LuaValue> + Send + 'static,
{
    let f = lua.create_function(move |lua, args: LuaMultiValue| {
        let args = HostArgs::new(function, args);
        let required = function.required_args();
        if args.len() < required {
            return Ok(args.misuse(&format!(
                "{} argument(s), got {}",
                required,
                args.len()
            )));
        }
        handler(lua, args)
    })?;
    lua.globals().set(function.as_str(), f)
}
