//! Lua scripting engine for keypad scripts.
//!
//! `LuaScriptingEngine` implements `KeypadScriptPort` from the application
//! layer. It owns one sandboxed Lua 5.4 VM with the `keybow_*` host
//! functions installed, and the callbacks the script defined at load time.

use keybow_application::{HostCapabilities, KeypadScriptPort, ScriptError, TickClock};
use keybow_domain::{KeyDispatch, KeyIndex, SETUP_CALLBACK, TICK_CALLBACK};
use mlua::prelude::*;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use super::hid_api::register_hid_api;
use super::io_api::register_io_api;
use super::lights_api::register_lights_api;
use super::sandbox::apply_sandbox;
use super::system_api::register_system_api;

/// Callbacks resolved once after the script's top level has run.
struct LiveSession {
    setup: Option<LuaRegistryKey>,
    tick: Option<LuaRegistryKey>,
    handlers: HashMap<KeyIndex, LuaRegistryKey>,
    lua: Lua,
}

/// Lua 5.4 scripting engine implementing `KeypadScriptPort`.
///
/// A script that fails to load still yields a usable engine: it simply
/// has no callbacks, so every key falls through to the host.
pub struct LuaScriptingEngine {
    session: Mutex<Option<LiveSession>>,
    has_tick: bool,
    clock: TickClock,
    host: HostCapabilities,
    script_path: PathBuf,
}

impl LuaScriptingEngine {
    /// Create the VM, install the host API and run `script_path`.
    ///
    /// Sets up the VM with:
    /// - Sandbox (no C modules, no `io`, restricted `os` and `require`)
    /// - Light, HID, system and I/O host functions
    ///
    /// Only VM construction failures are returned. Errors in the script
    /// itself are logged and leave the session without callbacks.
    pub fn initialize(script_path: &Path, host: HostCapabilities) -> Result<Self, ScriptError> {
        // Tick timestamps count from before the script runs.
        let clock = TickClock::start();
        let lua = Lua::new();

        let script_dir = script_path.parent().unwrap_or(Path::new("."));
        apply_sandbox(&lua, script_dir).map_err(|e| ScriptError {
            message: format!("sandbox setup failed: {}", e),
        })?;

        register_lights_api(&lua, &host).map_err(lua_to_script_error)?;
        register_hid_api(&lua, &host).map_err(lua_to_script_error)?;
        register_system_api(&lua, clock).map_err(lua_to_script_error)?;
        register_io_api(&lua, &host).map_err(lua_to_script_error)?;

        let session = match load_script(&lua, script_path) {
            Ok(()) => {
                info!("Loaded script {}", script_path.display());
                resolve_callbacks(lua, &host)
            }
            Err(ScriptLoadError::Read(e)) => {
                error!("Couldn't read {}: {}", script_path.display(), e);
                LiveSession::empty(lua)
            }
            Err(ScriptLoadError::Compile(e)) => {
                error!("Couldn't load {}: {}", script_path.display(), e);
                LiveSession::empty(lua)
            }
            Err(ScriptLoadError::Run(e)) => {
                // Definitions made before the failure are still usable.
                error!("Error running {}: {}", script_path.display(), e);
                resolve_callbacks(lua, &host)
            }
        };

        let has_tick = session.tick.is_some();
        if !has_tick {
            info!("No tick() function found in {}", script_path.display());
        }
        debug!(
            handlers = session.handlers.len(),
            setup = session.setup.is_some(),
            tick = has_tick,
            "Script callbacks resolved"
        );

        Ok(Self {
            session: Mutex::new(Some(session)),
            has_tick,
            clock,
            host,
            script_path: script_path.to_path_buf(),
        })
    }

    pub fn script_path(&self) -> &Path {
        &self.script_path
    }

    fn lock_session(&self) -> MutexGuard<'_, Option<LiveSession>> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Evaluate a chunk in the live VM.
    #[cfg(test)]
    fn eval<T: FromLuaMulti>(&self, code: &str) -> LuaResult<T> {
        let guard = self.lock_session();
        match guard.as_ref() {
            Some(session) => session.lua.load(code).eval(),
            None => Err(LuaError::runtime("session is shut down")),
        }
    }
}

impl LiveSession {
    fn empty(lua: Lua) -> Self {
        Self {
            setup: None,
            tick: None,
            handlers: HashMap::new(),
            lua,
        }
    }

    /// Call a stored callback; a runtime error is logged and swallowed.
    fn call(&self, key: &LuaRegistryKey, name: &str, args: impl IntoLuaMulti) {
        let result = self
            .lua
            .registry_value::<LuaFunction>(key)
            .and_then(|f| f.call::<()>(args));
        if let Err(e) = result {
            error!(callback = name, "Error running {}: {}", name, e);
        }
    }
}

enum ScriptLoadError {
    Read(std::io::Error),
    Compile(LuaError),
    Run(LuaError),
}

fn load_script(lua: &Lua, path: &Path) -> Result<(), ScriptLoadError> {
    let content = std::fs::read_to_string(path).map_err(ScriptLoadError::Read)?;
    let chunk = lua
        .load(&content)
        .set_name(format!("@{}", path.display()))
        .into_function()
        .map_err(ScriptLoadError::Compile)?;
    chunk.call::<()>(()).map_err(ScriptLoadError::Run)
}

fn resolve_callbacks(lua: Lua, host: &HostCapabilities) -> LiveSession {
    let setup = probe(&lua, SETUP_CALLBACK);
    let tick = probe(&lua, TICK_CALLBACK);
    let handlers = host
        .keys
        .iter()
        .filter_map(|key| probe(&lua, &key.index.handler_name()).map(|f| (key.index, f)))
        .collect();
    LiveSession {
        setup,
        tick,
        handlers,
        lua,
    }
}

/// Look up a global function and pin it in the registry.
fn probe(lua: &Lua, name: &str) -> Option<LuaRegistryKey> {
    match lua.globals().get::<LuaValue>(name) {
        Ok(LuaValue::Function(f)) => match lua.create_registry_value(f) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!("Couldn't register {}: {}", name, e);
                None
            }
        },
        _ => None,
    }
}

impl KeypadScriptPort for LuaScriptingEngine {
    fn run_setup(&self) {
        let guard = self.lock_session();
        if let Some(session) = guard.as_ref()
            && let Some(setup) = &session.setup
        {
            session.call(setup, SETUP_CALLBACK, ());
        }
    }

    fn dispatch_key(&self, index: KeyIndex, pressed: bool) -> KeyDispatch {
        let guard = self.lock_session();
        let Some(session) = guard.as_ref() else {
            return KeyDispatch::NotHandled;
        };
        match session.handlers.get(&index) {
            Some(handler) => {
                session.call(handler, &index.handler_name(), pressed);
                KeyDispatch::Handled
            }
            None => {
                info!("{} is not defined", index.handler_name());
                KeyDispatch::NotHandled
            }
        }
    }

    fn dispatch_tick(&self) {
        if !self.has_tick {
            return;
        }
        let guard = self.lock_session();
        if let Some(session) = guard.as_ref()
            && let Some(tick) = &session.tick
        {
            let elapsed = i64::try_from(self.clock.elapsed_millis()).unwrap_or(i64::MAX);
            session.call(tick, TICK_CALLBACK, elapsed);
        }
    }

    fn has_tick(&self) -> bool {
        self.has_tick
    }

    fn shutdown(&self) {
        let Some(session) = self.lock_session().take() else {
            return;
        };
        drop(session);
        self.host.hid().shutdown();
        info!("Closed script {}", self.script_path.display());
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Convert an mlua error to a ScriptError.
fn lua_to_script_error(e: LuaError) -> ScriptError {
    ScriptError {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SandboxedFileStore;
    use keybow_application::{
        HidController, HidTransportPort, LightArbiter, MidiTransportPort, PatternError,
        PatternSourcePort, SerialPort,
    };
    use keybow_domain::{
        KeyTable, KeyboardReport, MediaReport, MidiNote, MouseReport, Pattern, Rgb, StoreName,
    };
    use std::io;
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq)]
    enum Sent {
        Keyboard(KeyboardReport),
        Media(MediaReport),
        Mouse(MouseReport),
        Midi([u8; 3]),
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Sent>>>);

    impl Recorder {
        fn sent(&self) -> Vec<Sent> {
            self.0.lock().unwrap().clone()
        }
    }

    impl HidTransportPort for Recorder {
        fn send_keyboard(&mut self, report: &KeyboardReport) -> io::Result<()> {
            self.0.lock().unwrap().push(Sent::Keyboard(*report));
            Ok(())
        }

        fn send_media(&mut self, report: &MediaReport) -> io::Result<()> {
            self.0.lock().unwrap().push(Sent::Media(*report));
            Ok(())
        }

        fn send_mouse(&mut self, report: &MouseReport) -> io::Result<()> {
            self.0.lock().unwrap().push(Sent::Mouse(*report));
            Ok(())
        }
    }

    impl MidiTransportPort for Recorder {
        fn send_note(&mut self, note: &MidiNote) -> io::Result<()> {
            self.0.lock().unwrap().push(Sent::Midi(note.to_bytes()));
            Ok(())
        }
    }

    /// Serial port that echoes whatever was written.
    #[derive(Default)]
    struct Loopback(Vec<u8>);

    impl SerialPort for Loopback {
        fn read(&mut self) -> io::Result<Vec<u8>> {
            Ok(std::mem::take(&mut self.0))
        }

        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.extend_from_slice(data);
            Ok(data.len())
        }
    }

    /// One-frame pattern that paints every LED green.
    struct Green;

    impl PatternSourcePort for Green {
        fn load(&self, name: &StoreName) -> Result<Pattern, PatternError> {
            if name.as_str() == "green" {
                Ok(Pattern::new(12, vec![Rgb::new(0, 255, 0); 12]))
            } else {
                Err(PatternError::NotFound(name.as_str().into()))
            }
        }
    }

    struct Fixture {
        dir: TempDir,
        recorder: Recorder,
        host: HostCapabilities,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = tempfile::tempdir().unwrap();
            let recorder = Recorder::default();
            let host = HostCapabilities {
                keys: Arc::new(KeyTable::keybow_default()),
                hid: Arc::new(Mutex::new(HidController::new(
                    Box::new(recorder.clone()),
                    Box::new(recorder.clone()),
                ))),
                lights: Arc::new(LightArbiter::new(12, false)),
                patterns: Arc::new(Green),
                files: Arc::new(SandboxedFileStore::new(dir.path().join("user"))),
                serial: Arc::new(Mutex::new(Loopback::default())),
            };
            Self {
                dir,
                recorder,
                host,
            }
        }

        fn engine(&self, script: &str) -> LuaScriptingEngine {
            let path = self.dir.path().join("keys.lua");
            std::fs::write(&path, script).unwrap();
            LuaScriptingEngine::initialize(&path, self.host.clone()).unwrap()
        }
    }

    #[test]
    fn test_key_handler_sets_pixel() {
        let fx = Fixture::new();
        let engine = fx.engine(
            r#"
            function handle_key_00(pressed)
                if pressed then keybow_set_pixel(3, 255, 0, 0) end
            end
            "#,
        );

        assert_eq!(engine.dispatch_key(KeyIndex(0), true), KeyDispatch::Handled);
        assert_eq!(fx.host.lights.pixel(3), Some(Rgb::new(255, 0, 0)));

        assert_eq!(engine.dispatch_key(KeyIndex(0), false), KeyDispatch::Handled);
        assert_eq!(fx.host.lights.pixel(3), Some(Rgb::new(255, 0, 0)));
    }

    #[test]
    fn test_missing_handler_is_not_handled() {
        let fx = Fixture::new();
        let engine = fx.engine("function handle_key_00(p) end");
        assert_eq!(engine.dispatch_key(KeyIndex(5), true), KeyDispatch::NotHandled);
        assert!(fx.recorder.sent().is_empty());
    }

    #[test]
    fn test_handlers_are_resolved_at_load_time() {
        let fx = Fixture::new();
        let engine = fx.engine(
            r#"
            function setup()
                function handle_key_01(p) end
            end
            "#,
        );
        engine.run_setup();
        assert_eq!(engine.dispatch_key(KeyIndex(1), true), KeyDispatch::NotHandled);
    }

    #[test]
    fn test_setup_runs_once() {
        let fx = Fixture::new();
        let engine = fx.engine("calls = 0\nfunction setup() calls = calls + 1 end");
        engine.run_setup();
        assert_eq!(engine.eval::<i64>("return calls").unwrap(), 1);
    }

    #[test]
    fn test_tick_receives_non_decreasing_millis() {
        let fx = Fixture::new();
        let engine = fx.engine(
            r#"
            seen = {}
            function tick(ms) seen[#seen + 1] = ms end
            "#,
        );
        assert!(engine.has_tick());

        for _ in 0..3 {
            engine.dispatch_tick();
            std::thread::sleep(Duration::from_millis(2));
        }

        let seen: Vec<i64> = engine.eval("return seen").unwrap();
        assert_eq!(seen.len(), 3);
        assert!(seen[0] >= 0);
        assert!(seen.windows(2).all(|w| w[0] <= w[1]));
        assert!(seen[2] >= 4);
    }

    #[test]
    fn test_script_without_tick() {
        let fx = Fixture::new();
        let engine = fx.engine("function handle_key_00(p) end");
        assert!(!engine.has_tick());
        engine.dispatch_tick();
    }

    #[test]
    fn test_syntax_error_leaves_empty_session() {
        let fx = Fixture::new();
        let engine = fx.engine("function handle_key_00(p) end\nfunction tick(");
        assert!(!engine.has_tick());
        assert_eq!(engine.dispatch_key(KeyIndex(0), true), KeyDispatch::NotHandled);
        engine.run_setup();
    }

    #[test]
    fn test_missing_script_leaves_empty_session() {
        let fx = Fixture::new();
        let engine = LuaScriptingEngine::initialize(
            &fx.dir.path().join("absent.lua"),
            fx.host.clone(),
        )
        .unwrap();
        assert!(engine.is_available());
        assert!(!engine.has_tick());
        assert_eq!(engine.dispatch_key(KeyIndex(0), true), KeyDispatch::NotHandled);
    }

    #[test]
    fn test_top_level_error_keeps_earlier_definitions() {
        let fx = Fixture::new();
        let engine = fx.engine("function tick(ms) end\nerror('boom')\nfunction handle_key_00(p) end");
        assert!(engine.has_tick());
        assert_eq!(engine.dispatch_key(KeyIndex(0), true), KeyDispatch::NotHandled);
    }

    #[test]
    fn test_runtime_error_does_not_poison_session() {
        let fx = Fixture::new();
        let engine = fx.engine(
            r#"
            presses = 0
            function handle_key_02(pressed)
                presses = presses + 1
                if presses == 1 then error("first press fails") end
                keybow_set_pixel(2, 0, 0, 255)
            end
            "#,
        );

        assert_eq!(engine.dispatch_key(KeyIndex(2), true), KeyDispatch::Handled);
        assert_eq!(fx.host.lights.pixel(2), Some(Rgb::BLACK));

        assert_eq!(engine.dispatch_key(KeyIndex(2), true), KeyDispatch::Handled);
        assert_eq!(fx.host.lights.pixel(2), Some(Rgb::new(0, 0, 255)));
    }

    #[test]
    fn test_shutdown_releases_hid() {
        let fx = Fixture::new();
        let engine = fx.engine("function handle_key_00(p) keybow_set_key(0x04, p) end");
        engine.dispatch_key(KeyIndex(0), true);
        engine.shutdown();

        let sent = fx.recorder.sent();
        let tail = &sent[sent.len() - 2..];
        assert_eq!(tail[0], Sent::Keyboard(KeyboardReport::default()));
        assert_eq!(tail[1], Sent::Mouse(MouseReport::default()));
        assert_eq!(engine.dispatch_key(KeyIndex(0), true), KeyDispatch::NotHandled);

        let flushed = fx.recorder.sent().len();
        engine.shutdown();
        assert_eq!(fx.recorder.sent().len(), flushed);
    }

    #[test]
    fn test_text_types_each_character() {
        let fx = Fixture::new();
        let engine = fx.engine("function handle_key_00(p) keybow_text('Hi!') end");
        engine.dispatch_key(KeyIndex(0), true);
        let keyboard = fx
            .recorder
            .sent()
            .into_iter()
            .filter(|s| matches!(s, Sent::Keyboard(_)))
            .count();
        assert_eq!(keyboard, 4);
    }

    #[test]
    fn test_set_key_reports_change() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        let changed: (bool, bool, bool) = engine
            .eval("return keybow_set_key(4, true), keybow_set_key(4, true), keybow_set_key(4, false)")
            .unwrap();
        assert_eq!(changed, (true, false, true));
        assert_eq!(fx.recorder.sent().len(), 2);
    }

    #[test]
    fn test_media_key_flushes_only_on_change() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        let changed: (bool, bool) = engine
            .eval("return keybow_set_media_key(2, true), keybow_set_media_key(2, true)")
            .unwrap();
        assert_eq!(changed, (true, false));
        assert_eq!(
            fx.recorder.sent(),
            vec![Sent::Media(MediaReport { keys: 0b100 })]
        );
    }

    #[test]
    fn test_mouse_move_flushes_report() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        let ok: bool = engine.eval("return keybow_set_mousemove(300, -5)").unwrap();
        assert!(ok);
        assert_eq!(
            fx.recorder.sent(),
            vec![Sent::Mouse(MouseReport {
                buttons: 0,
                dx: 127,
                dy: -5,
                wheel: 0
            })]
        );
    }

    #[test]
    fn test_midi_note_is_sent() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        engine
            .eval::<()>("keybow_send_midi_note(1, 60, 100, true)")
            .unwrap();
        assert_eq!(fx.recorder.sent(), vec![Sent::Midi([0x91, 60, 100])]);

        let misuse: bool = engine.eval("return keybow_send_midi_note(16, 60, 100)").unwrap();
        assert!(!misuse);
    }

    #[test]
    fn test_misuse_returns_false_or_nil() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        let results: (bool, bool, bool, bool) = engine
            .eval(
                "return keybow_set_pixel('x', 1, 2, 3), keybow_set_key(), \
                 keybow_set_modifier(8, true), keybow_set_pixel(0, 256, 0, 0)",
            )
            .unwrap();
        assert_eq!(results, (false, false, false, false));

        let loaded: LuaValue = engine.eval("return keybow_file_load('../escape')").unwrap();
        assert!(loaded.is_nil());
    }

    #[test]
    fn test_file_round_trip_from_script() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        let saved: bool = engine
            .eval("return keybow_file_save('state.bin', 'a\\0b')")
            .unwrap();
        assert!(saved);

        let loaded: LuaString = engine.eval("return keybow_file_load('state.bin')").unwrap();
        assert_eq!(loaded.as_bytes().to_vec(), b"a\0b".to_vec());

        let missing: LuaValue = engine.eval("return keybow_file_load('other')").unwrap();
        assert!(missing.is_nil());
    }

    #[test]
    fn test_serial_round_trip() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        let written: i64 = engine.eval("return keybow_serial_write('ping')").unwrap();
        assert_eq!(written, 4);
        let read: String = engine.eval("return keybow_serial_read()").unwrap();
        assert_eq!(read, "ping");
        let empty: String = engine.eval("return keybow_serial_read()").unwrap();
        assert_eq!(empty, "");
    }

    #[test]
    fn test_pattern_and_clear() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        let results: (bool, bool, bool) = engine
            .eval("return keybow_load_pattern('green'), keybow_load_pattern('nope'), keybow_load_pattern('a/b')")
            .unwrap();
        assert_eq!(results, (true, false, false));
        assert_eq!(fx.host.lights.pixel(11), Some(Rgb::new(0, 255, 0)));

        engine.eval::<()>("keybow_clear_lights()").unwrap();
        assert_eq!(fx.host.lights.pixel(11), Some(Rgb::BLACK));
    }

    #[test]
    fn test_auto_lights_toggle() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        engine.eval::<()>("keybow_auto_lights(true)").unwrap();
        assert!(fx.host.lights.is_auto());
        engine.eval::<()>("keybow_auto_lights(false)").unwrap();
        assert!(!fx.host.lights.is_auto());
    }

    #[test]
    fn test_get_millis_is_integer() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        let (ms, kind): (i64, String) = engine
            .eval("local t = keybow_get_millis() return t, math.type(t)")
            .unwrap();
        assert!(ms >= 0);
        assert_eq!(kind, "integer");
    }

    #[test]
    fn test_every_host_function_is_installed() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        for function in keybow_domain::HostFunction::ALL {
            let kind: String = engine
                .eval(&format!("return type({})", function.as_str()))
                .unwrap();
            assert_eq!(kind, "function", "{} missing", function);
        }
    }

    #[test]
    fn test_script_is_sandboxed() {
        let fx = Fixture::new();
        let engine = fx.engine("");
        let sandboxed: bool = engine
            .eval("return io == nil and os.execute == nil and package.loadlib == nil")
            .unwrap();
        assert!(sandboxed);
    }

    #[test]
    fn test_require_sibling_module() {
        let fx = Fixture::new();
        std::fs::write(
            fx.dir.path().join("palette.lua"),
            "return { warm = function() keybow_set_pixel(1, 200, 100, 0) end }",
        )
        .unwrap();
        let engine = fx.engine("local palette = require('palette')\nfunction handle_key_01(p) palette.warm() end");
        engine.dispatch_key(KeyIndex(1), true);
        assert_eq!(fx.host.lights.pixel(1), Some(Rgb::new(200, 100, 0)));
    }
}
