//! Device loop use case.
//!
//! Turns key events and ticks from the input side into script calls, and
//! applies a key's fallback scan code when the script does not handle it.

use keybow_domain::{KeyDispatch, KeyEvent};
use tracing::{debug, info, warn};

use crate::host::HostCapabilities;
use crate::ports::scripting_engine::KeypadScriptPort;

pub struct DeviceLoop<S: KeypadScriptPort> {
    script: S,
    host: HostCapabilities,
}

impl<S: KeypadScriptPort> DeviceLoop<S> {
    pub fn new(script: S, host: HostCapabilities) -> Self {
        Self { script, host }
    }

    pub fn script(&self) -> &S {
        &self.script
    }

    pub fn host(&self) -> &HostCapabilities {
        &self.host
    }

    /// Run the script's `setup()`.
    pub fn start(&self) {
        info!(
            scripted = self.script.is_available(),
            tick = self.script.has_tick(),
            "Starting device loop"
        );
        self.script.run_setup();
    }

    /// Deliver one key transition.
    pub fn handle_key(&self, event: KeyEvent) -> KeyDispatch {
        let Some(key) = self.host.keys.get(event.index).copied() else {
            warn!("Ignoring event for unknown key {}", event.index);
            return KeyDispatch::NotHandled;
        };

        let outcome = self.script.dispatch_key(event.index, event.pressed);
        if outcome == KeyDispatch::NotHandled
            && let Some(code) = key.hid_code
        {
            debug!("Key {} falls back to code {:#04x}", event.index, code);
            self.host.hid().set_key(code, event.pressed);
        }
        outcome
    }

    pub fn tick(&self) {
        self.script.dispatch_tick();
    }

    pub fn shutdown(self) {
        info!("Shutting down device loop");
        self.script.shutdown();
    }
}
