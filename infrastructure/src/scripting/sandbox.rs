//! Lua sandbox for keypad scripts.
//!
//! Scripts come from a removable storage partition, so the VM is stripped
//! of everything that reaches outside the process. Pure-Lua `require` is
//! kept but served by a host searcher bound to the script's own directory;
//! `package.path` is ignored.

use std::path::{Path, PathBuf};

use mlua::prelude::*;

/// Apply sandbox restrictions to the Lua VM.
///
/// Removes:
/// - `package.loadlib`, `package.searchpath` and every file searcher
/// - `io`, `dofile`, `loadfile`
/// - `os.execute`, `os.exit`, `os.remove`, `os.rename`, `os.tmpname`, `os.getenv`
///
/// `require` then resolves `a.b` to `<script_dir>/a/b.lua` only.
pub fn apply_sandbox(lua: &Lua, script_dir: &Path) -> LuaResult<()> {
    lua.load(
        r#"
        package.loadlib = nil
        package.searchpath = nil
        package.cpath = ''
        package.path = ''

        io = nil
        dofile = nil
        loadfile = nil

        os.execute = nil
        os.exit = nil
        os.remove = nil
        os.rename = nil
        os.tmpname = nil
        os.getenv = nil
    "#,
    )
    .set_name("sandbox")
    .exec()?;

    let dir = if script_dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        script_dir.to_path_buf()
    };

    // Returns a loader, or a message that `require` folds into its error
    let searcher = lua.create_function(move |lua, name: String| {
        let Some(path) = module_path(&dir, &name) else {
            let reason = format!("module '{name}' is outside the script directory");
            return Ok((LuaValue::String(lua.create_string(reason)?), LuaValue::Nil));
        };
        let source = match std::fs::read(&path) {
            Ok(source) => source,
            Err(e) => {
                let reason = format!("no file '{}' ({})", path.display(), e);
                return Ok((LuaValue::String(lua.create_string(reason)?), LuaValue::Nil));
            }
        };
        let loader = lua
            .load(source)
            .set_name(format!("@{}", path.display()))
            .into_function()?;
        let origin = lua.create_string(path.display().to_string())?;
        Ok((LuaValue::Function(loader), LuaValue::String(origin)))
    })?;

    let package: LuaTable = lua.globals().get("package")?;
    let searchers: LuaTable = package.get("searchers")?;
    let preload: LuaValue = searchers.raw_get(1)?;
    package.set("searchers", lua.create_sequence_from([preload, LuaValue::Function(searcher)])?)
}

/// Map a module name to a file under `dir`.
///
/// Dots separate directories. Names with path separators, empty
/// segments or `..` are refused.
fn module_path(dir: &Path, name: &str) -> Option<PathBuf> {
    if name.is_empty() || name.contains(['/', '\\', '\0']) || name.contains("..") {
        return None;
    }
    let mut path = dir.to_path_buf();
    for segment in name.split('.') {
        if segment.is_empty() {
            return None;
        }
        path.push(segment);
    }
    path.set_extension("lua");
    Some(path)
}
