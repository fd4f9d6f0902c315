//! Sandboxed file store port
//!
//! Storage is best-effort: neither operation reports I/O errors to the
//! caller. Names are already validated by [`StoreName`].

use keybow_domain::{StoreLookup, StoreName};

pub trait FileStorePort: Send + Sync {
    /// Read the full contents stored under `name`.
    fn load(&self, name: &StoreName) -> StoreLookup;

    /// Replace the contents stored under `name`. Returns `false` if
    /// nothing was written.
    fn save(&self, name: &StoreName, contents: &[u8]) -> bool;
}
