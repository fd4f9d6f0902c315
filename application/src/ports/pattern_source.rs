//! Pattern source port
//!
//! Resolves a pattern name to a decoded image. The light arbiter calls
//! this while holding the buffer lock, so implementations must not touch
//! the arbiter themselves.

use keybow_domain::{Pattern, StoreName};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PatternError {
    #[error("Pattern not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to decode pattern {}: {}", .path.display(), .message)]
    Decode { path: PathBuf, message: String },

    #[error("Pattern source unavailable")]
    Unavailable,
}

pub trait PatternSourcePort: Send + Sync {
    fn load(&self, name: &StoreName) -> Result<Pattern, PatternError>;
}

/// Source with no patterns at all.
pub struct NoPatterns;

impl PatternSourcePort for NoPatterns {
    fn load(&self, _name: &StoreName) -> Result<Pattern, PatternError> {
        Err(PatternError::Unavailable)
    }
}
