//! Key/value backends for persisted user documents.
//!
//! Documents are small JSON strings addressed by key. Native builds keep
//! one file per key under a storage directory; browser builds use
//! `window.localStorage`. [`MemoryStore`] backs tests.

use std::collections::HashMap;
use std::sync::Mutex;

use bevy::prelude::*;

use crate::storage_error::StorageError;

/// A flat string store. Single writer, last write wins.
pub trait KeyValueStore: Send + Sync + 'static {
    /// `Ok(None)` when the key has never been written.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// The store used by [`crate::StoragePlugin`].
#[derive(Resource)]
pub struct DocumentStore(pub Box<dyn KeyValueStore>);

impl DocumentStore {
    pub fn new(store: impl KeyValueStore) -> Self {
        Self(Box::new(store))
    }

    /// The platform store: files on native, `localStorage` in the browser.
    pub fn platform_default() -> Self {
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(FileStore::from_env())
        }
        #[cfg(target_arch = "wasm32")]
        {
            Self::new(LocalStorageStore)
        }
    }
}

impl std::ops::Deref for DocumentStore {
    type Target = dyn KeyValueStore;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        self
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory store lock poisoned".to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Native: one JSON file per key
// ---------------------------------------------------------------------------

#[cfg(not(target_arch = "wasm32"))]
pub use file_store::FileStore;

#[cfg(not(target_arch = "wasm32"))]
mod file_store {
    use std::path::{Path, PathBuf};

    use crate::atomic_write::atomic_write;
    use crate::config::{DEFAULT_STORAGE_DIR, STORAGE_DIR_ENV};
    use crate::storage_error::StorageError;

    use super::KeyValueStore;

    pub struct FileStore {
        root: PathBuf,
    }

    impl FileStore {
        pub fn new(root: impl Into<PathBuf>) -> Self {
            Self { root: root.into() }
        }

        /// Store rooted at `$WAYFINDER_STORAGE_DIR`, or the default directory
        /// next to the working directory.
        pub fn from_env() -> Self {
            let root = std::env::var_os(STORAGE_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STORAGE_DIR));
            Self::new(root)
        }

        pub fn root(&self) -> &Path {
            &self.root
        }

        /// Keys are user-controlled, so anything outside `[A-Za-z0-9_-]` is
        /// replaced to keep the file inside `root`.
        pub fn path_for(&self, key: &str) -> PathBuf {
            let safe: String = key
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                        c
                    } else {
                        '_'
                    }
                })
                .collect();
            self.root.join(format!("{safe}.json"))
        }
    }

    impl KeyValueStore for FileStore {
        fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
            match std::fs::read_to_string(self.path_for(key)) {
                Ok(text) => Ok(Some(text)),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
            atomic_write(&self.path_for(key), value.as_bytes())?;
            Ok(())
        }

        fn remove(&self, key: &str) -> Result<(), StorageError> {
            match std::fs::remove_file(self.path_for(key)) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// WASM: window.localStorage
// ---------------------------------------------------------------------------

#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageStore {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        Self::storage()?
            .remove_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::default();
        assert_eq!(store.read("k").unwrap(), None);
        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
        store.remove("k").unwrap();
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = std::env::temp_dir().join("wayfinder_file_store_missing");
        let _ = std::fs::remove_dir_all(&dir);
        let store = FileStore::new(&dir);
        assert_eq!(store.read("wayfinder-events-anonymous").unwrap(), None);
        store.remove("wayfinder-events-anonymous").unwrap();
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_writes_one_file_per_key() {
        let dir = std::env::temp_dir().join("wayfinder_file_store_write");
        let _ = std::fs::remove_dir_all(&dir);
        let store = FileStore::new(&dir);

        store.write("wayfinder-events-alice", "[]").unwrap();
        assert_eq!(
            std::fs::read_to_string(dir.join("wayfinder-events-alice.json")).unwrap(),
            "[]"
        );
        assert_eq!(
            store.read("wayfinder-events-alice").unwrap().as_deref(),
            Some("[]")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_keys_cannot_escape_root() {
        let store = FileStore::new("/tmp/wayfinder-root");
        let path = store.path_for("wayfinder-events-../../etc/passwd");
        assert!(path.starts_with(store.root()));
        assert_eq!(path.parent(), Some(store.root()));
    }
}
