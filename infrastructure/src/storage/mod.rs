//! Sandboxed file store
//!
//! This module provides [`SandboxedFileStore`], the [`FileStorePort`]
//! implementation behind `keybow_file_save` and `keybow_file_load`.
//!
//! # Overview
//!
//! Every file lives directly inside one directory, normally
//! `/boot/user` on the device's FAT partition. Scripts address files by a
//! [`StoreName`], which cannot contain separators or dot segments, so
//! the resolved path never leaves that directory.
//!
//! # Example
//!
//! ```ignore
//! use keybow_infrastructure::SandboxedFileStore;
//! use keybow_application::FileStorePort;
//! use keybow_domain::StoreName;
//!
//! let store = SandboxedFileStore::new("/boot/user");
//! let name = StoreName::parse("layer.txt")?;
//! store.save(&name, b"2");
//! ```

use keybow_application::FileStorePort;
use keybow_domain::{StoreLookup, StoreName};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File store confined to a single directory.
///
/// # Thread Safety
///
/// `SandboxedFileStore` holds only its directory path and is
/// `Send + Sync`. Concurrent saves to the same name race at the
/// filesystem level; the host never issues them.
#[derive(Debug, Clone)]
pub struct SandboxedFileStore {
    dir: PathBuf,
}

impl SandboxedFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `<root>/<subdir>`.
    pub fn with_root(root: &Path, subdir: &str) -> Self {
        Self::new(root.join(subdir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn resolve(&self, name: &StoreName) -> PathBuf {
        self.dir.join(name.as_str())
    }
}

impl FileStorePort for SandboxedFileStore {
    fn load(&self, name: &StoreName) -> StoreLookup {
        let path = self.resolve(name);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!("Loaded {} bytes from {}", bytes.len(), path.display());
                StoreLookup::Found(bytes)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => StoreLookup::NotFound,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                StoreLookup::NotFound
            }
        }
    }

    fn save(&self, name: &StoreName, contents: &[u8]) -> bool {
        if let Err(e) = fs::create_dir_all(&self.dir) {
            warn!("Failed to create {}: {}", self.dir.display(), e);
            return false;
        }
        let path = self.resolve(name);
        match fs::write(&path, contents) {
            Ok(()) => {
                debug!("Saved {} bytes to {}", contents.len(), path.display());
                true
            }
            Err(e) => {
                warn!("Failed to write {}: {}", path.display(), e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn name(s: &str) -> StoreName {
        StoreName::parse(s).unwrap()
    }

    fn store() -> (TempDir, SandboxedFileStore) {
        let dir = TempDir::new().unwrap();
        let store = SandboxedFileStore::with_root(dir.path(), "user");
        (dir, store)
    }

    #[test]
    fn test_save_then_load() {
        let (_dir, store) = store();
        assert!(store.save(&name("layer.txt"), b"\x00\x01binary\xff"));
        assert_eq!(
            store.load(&name("layer.txt")),
            StoreLookup::Found(b"\x00\x01binary\xff".to_vec())
        );
    }

    #[test]
    fn test_save_truncates() {
        let (_dir, store) = store();
        assert!(store.save(&name("count"), b"123456"));
        assert!(store.save(&name("count"), b"7"));
        assert_eq!(store.load(&name("count")).into_found(), Some(b"7".to_vec()));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let (_dir, store) = store();
        assert_eq!(store.load(&name("absent")), StoreLookup::NotFound);
    }

    #[test]
    fn test_empty_file_is_found() {
        let (_dir, store) = store();
        assert!(store.save(&name("empty"), b""));
        assert_eq!(store.load(&name("empty")), StoreLookup::Found(Vec::new()));
    }

    #[test]
    fn test_files_stay_inside_store_dir() {
        let (dir, store) = store();
        store.save(&name("inside"), b"x");
        assert!(dir.path().join("user").join("inside").exists());
        assert!(!dir.path().join("inside").exists());
    }

    #[test]
    fn test_directory_name_reads_as_not_found() {
        let (_dir, store) = store();
        fs::create_dir_all(store.dir().join("sub")).unwrap();
        assert_eq!(store.load(&name("sub")), StoreLookup::NotFound);
        assert!(!store.save(&name("sub"), b"x"));
    }

    #[test]
    fn test_unwritable_root_fails_softly() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"").unwrap();
        let store = SandboxedFileStore::with_root(&blocker, "user");
        assert!(!store.save(&name("x"), b"y"));
        assert_eq!(store.load(&name("x")), StoreLookup::NotFound);
    }
}
