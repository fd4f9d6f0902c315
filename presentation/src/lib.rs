//! Presentation layer for keybow-host
//!
//! This crate contains the CLI definition and terminal output:
//! the simulated LED driver and start-up reports.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::Cli;
pub use output::console::ConsoleLightDriver;
pub use output::formatter::{format_issue, format_session_banner};
