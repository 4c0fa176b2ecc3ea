//! Browser LocalStorage store (wasm32)

use super::{KeyValueStore, StorageError};

/// Thin wrapper over `window.localStorage`
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    /// Fails when the page has no window or storage is disabled
    pub fn open() -> Result<Self, StorageError> {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| StorageError::Unavailable("localStorage not accessible".to_string()))?;
        Ok(Self { storage })
    }
}

fn js_error(op: &str, key: &str) -> StorageError {
    StorageError::Unavailable(format!("localStorage {} failed for {}", op, key))
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(|_| js_error("get", key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|_| js_error("set", key))
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|_| js_error("remove", key))
    }
}
