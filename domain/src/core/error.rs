//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("Invalid key event: {0}")]
    InvalidKeyEvent(String),

    #[error("Unknown host function: {0}")]
    UnknownHostFunction(String),

    #[error("Invalid MIDI note: {0}")]
    InvalidMidiNote(String),
}

impl DomainError {
    /// Check if this error is a rejected sandbox path
    pub fn is_sandbox_violation(&self) -> bool {
        matches!(self, DomainError::InvalidName { .. })
    }
}
