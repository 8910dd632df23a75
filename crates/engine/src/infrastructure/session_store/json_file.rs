//! JSON file session store.
//!
//! Keeps a key -> string map in memory and mirrors it to a single JSON file
//! after every change, so a session survives an engine restart the way
//! browser storage survives a page reload.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use crate::infrastructure::ports::{SessionStore, StoreError};

pub struct JsonFileSessionStore {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: RwLock<HashMap<String, String>>,
}

impl JsonFileSessionStore {
    /// Open the store at `path`.
    ///
    /// A missing file starts empty. An unreadable or corrupt file also starts
    /// empty (with a warning) and is overwritten by the next write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let storage_path = path.into();

        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!(path = ?storage_path, error = %e, "Failed to parse session file");
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!(path = ?storage_path, error = %e, "Failed to read session file");
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!(path = ?storage_path, keys = cache.len(), "Session file store initialized");

        Self {
            storage_path,
            cache: RwLock::new(cache),
        }
    }

    pub fn path(&self) -> &Path {
        &self.storage_path
    }

    /// Persist the cache to disk
    fn persist(&self, operation: &'static str) -> Result<(), StoreError> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StoreError::io(operation, e))?;
            }
        }

        let data = {
            let cache = self
                .cache
                .read()
                .map_err(|e| StoreError::io(operation, e))?;
            serde_json::to_string_pretty(&*cache).map_err(StoreError::serialization)?
        };

        fs::write(&self.storage_path, data).map_err(|e| StoreError::io(operation, e))
    }
}

impl SessionStore for JsonFileSessionStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let cache = self.cache.read().map_err(|e| StoreError::io("read", e))?;
        Ok(cache.get(key).map(|value| value.clone().into_bytes()))
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let text = std::str::from_utf8(value).map_err(StoreError::serialization)?;
        {
            let mut cache = self.cache.write().map_err(|e| StoreError::io("write", e))?;
            cache.insert(key.to_string(), text.to_string());
        } // Release lock before I/O
        self.persist("write")
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let removed = {
            let mut cache = self
                .cache
                .write()
                .map_err(|e| StoreError::io("remove", e))?;
            cache.remove(key).is_some()
        };
        if removed {
            self.persist("remove")?;
        }
        Ok(())
    }
}
