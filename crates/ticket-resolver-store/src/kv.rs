//! Key/value storage backends holding string-keyed JSON blobs.

use crate::error::StoreError;
use log::{debug, info};
use parking_lot::RwLock;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Shared handle to a storage backend, passed to every record store.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Synchronous string-keyed storage, modelled on browser local storage.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove `key`, returning whether it was present.
    fn remove(&self, key: &str) -> Result<bool, StoreError>;
}

/// Read and decode the JSON blob stored under `key`.
pub fn read_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Encode `value` as JSON and store it under `key`.
pub fn write_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// File-backed store keeping one `<key>.json` file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Root directory for stored blobs.
    root: PathBuf,
}

impl FileStore {
    /// Create a new file-backed store under the given root.
    pub fn new(root: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        info!("initialized file store (root={})", root.display());
        Ok(Self { root })
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path to the blob file for a key.
    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    /// Path to the temporary file used while rewriting a key.
    fn temp_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json.tmp"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => {
                debug!("read key (key={}, len={})", key, raw.len());
                Ok(Some(raw))
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    /// Rewrite a key atomically.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        let temp_path = self.temp_path(key);
        {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&temp_path)?;
            file.write_all(value.as_bytes())?;
            file.flush()?;
        }
        std::fs::rename(temp_path, path)?;
        debug!("wrote key (key={}, len={})", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        let path = self.key_path(key)?;
        match std::fs::remove_file(path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}

/// In-memory store; contents live as long as the value.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.write().remove(key).is_some())
    }
}

/// Keys become file names, so only a conservative alphabet is accepted.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{FileStore, KeyValueStore, MemoryStore, read_json, validate_key, write_json};
    use crate::error::StoreError;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn file_store_round_trips_and_survives_reopen() {
        let temp = tempdir().expect("tempdir");
        let store = FileStore::new(temp.path()).expect("store");
        assert_eq!(store.get("registeredUsers").expect("get"), None);

        store.set("registeredUsers", "[]").expect("set");
        let reopened = FileStore::new(temp.path()).expect("reopen");
        assert_eq!(
            reopened.get("registeredUsers").expect("get"),
            Some("[]".to_string())
        );
        assert!(temp.path().join("registeredUsers.json").exists());
        assert!(!temp.path().join("registeredUsers.json.tmp").exists());
    }

    #[test]
    fn file_store_remove_reports_presence() {
        let temp = tempdir().expect("tempdir");
        let store = FileStore::new(temp.path()).expect("store");
        store.set("ai-ticket-intro-seen", "true").expect("set");
        assert!(store.remove("ai-ticket-intro-seen").expect("remove"));
        assert!(!store.remove("ai-ticket-intro-seen").expect("remove again"));
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let temp = tempdir().expect("tempdir");
        let store = FileStore::new(temp.path()).expect("store");
        let err = store.set("../escape", "x").expect_err("invalid key");
        assert!(matches!(err, StoreError::InvalidKey(key) if key == "../escape"));
    }

    #[test]
    fn key_validation() {
        assert!(validate_key("ai-ticket-resolver-settings").is_ok());
        assert!(validate_key("a.b_c").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("a/b").is_err());
    }

    #[test]
    fn json_helpers_use_memory_store() {
        let store = MemoryStore::new();
        write_json(&store, "numbers", &vec![1, 2, 3]).expect("write");
        let numbers: Option<Vec<u32>> = read_json(&store, "numbers").expect("read");
        assert_eq!(numbers, Some(vec![1, 2, 3]));
        let missing: Option<Vec<u32>> = read_json(&store, "missing").expect("read");
        assert_eq!(missing, None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn corrupt_blob_is_a_serde_error() {
        let store = MemoryStore::new();
        store.set("numbers", "not-json").expect("set");
        let err = read_json::<Vec<u32>>(&store, "numbers").expect_err("corrupt");
        assert!(matches!(err, StoreError::Serde(_)));
    }
}
