//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for keybow-host
#[derive(Parser, Debug)]
#[command(name = "keybow-host")]
#[command(author, version, about = "Run a Lua script against a macro keypad")]
#[command(long_about = r#"
keybow-host loads a Lua script and connects it to the keypad: key presses call
handle_key_NN(pressed), tick(ms) runs on a timer, and the script drives the
LEDs, the USB HID gadget, MIDI and the serial link through keybow_* functions.

Key events are read from stdin, one per line: "<index> <state>", e.g. "3 down".

Configuration files are loaded from (in priority order):
1. KEYBOW_<SECTION>__<KEY>           Environment overrides
2. --config <path>                   Explicit config file
3. ./keybow.toml                     Project-level config
4. ~/.config/keybow/config.toml      Global config

Example:
  keybow-host --script /boot/keys.lua
  keybow-host --simulate --script demo.lua -vv
"#)]
pub struct Cli {
    /// Lua script to run (overrides [script] path)
    #[arg(short, long, value_name = "PATH")]
    pub script: Option<PathBuf>,

    /// Draw LEDs in the terminal and discard HID, MIDI and serial output
    #[arg(long)]
    pub simulate: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Also write logs to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace", // -vvv or more
        }
    }
}
