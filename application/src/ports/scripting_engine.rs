//! Scripting engine port: interface for the script session.
//!
//! This port abstracts the scripting engine so that:
//! - The application/presentation layers don't depend on mlua
//! - A no-op implementation (`NoScriptingEngine`) is always available
//! - The `scripting` feature gate only affects infrastructure + CLI
//!
//! Every method is infallible from the caller's point of view: failures
//! inside the script are logged by the engine and never reach the host.

use keybow_domain::{KeyDispatch, KeyIndex};

/// Error from setting up a scripting engine.
#[derive(Debug, Clone)]
pub struct ScriptError {
    pub message: String,
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "script error: {}", self.message)
    }
}

impl std::error::Error for ScriptError {}

/// Port for one live script session.
///
/// The host serializes its calls: no method is invoked while another one
/// is still running.
pub trait KeypadScriptPort: Send + Sync {
    /// Invoke the script's `setup()` if it defines one.
    fn run_setup(&self);

    /// Invoke the handler for `index` with the pressed state.
    fn dispatch_key(&self, index: KeyIndex, pressed: bool) -> KeyDispatch;

    /// Invoke `tick(elapsed_ms)` if the script defines it.
    fn dispatch_tick(&self);

    /// Whether a `tick` callback was found when the script loaded.
    fn has_tick(&self) -> bool;

    /// Release the script and leave the HID device fully released.
    fn shutdown(&self);

    /// Whether the engine is actually available (i.e. not `NoScriptingEngine`).
    fn is_available(&self) -> bool;
}

/// No-op scripting engine used when the `scripting` feature is disabled.
///
/// Every key is reported as unhandled so the host's fallback codes apply.
pub struct NoScriptingEngine;

impl KeypadScriptPort for NoScriptingEngine {
    fn run_setup(&self) {}

    fn dispatch_key(&self, _index: KeyIndex, _pressed: bool) -> KeyDispatch {
        KeyDispatch::NotHandled
    }

    fn dispatch_tick(&self) {}

    fn has_tick(&self) -> bool {
        false
    }

    fn shutdown(&self) {}

    fn is_available(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_scripting_engine_is_noop() {
        let engine = NoScriptingEngine;
        assert!(!engine.is_available());
        assert!(!engine.has_tick());
        assert_eq!(
            engine.dispatch_key(KeyIndex(0), true),
            KeyDispatch::NotHandled
        );
        engine.run_setup();
        engine.dispatch_tick();
        engine.shutdown();
    }

    #[test]
    fn test_script_error_display() {
        let err = ScriptError {
            message: "keys.lua:3: unexpected symbol".to_string(),
        };
        assert_eq!(err.to_string(), "script error: keys.lua:3: unexpected symbol");
    }
}
