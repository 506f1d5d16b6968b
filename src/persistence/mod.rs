//! Key-value persistence
//!
//! Stores:
//! - `MemoryStore`: in-process map (tests, headless runs)
//! - `JsonFileStore`: a flat JSON object on disk (native)
//! - `LocalStore`: browser LocalStorage (wasm)
//!
//! Every operation returns a `Result`; callers decide how to degrade.

use std::collections::BTreeMap;

use crate::error::StorageError;

/// Minimal string key-value contract
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        Ok(())
    }
}

/// JSON object on disk, rewritten on every change
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
    entries: BTreeMap<String, String>,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    /// Open (or start) a store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<std::path::PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("Ignoring corrupt store {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        log::info!("Opened store {} ({} keys)", path.display(), entries.len());
        Self { path, entries }
    }

    fn flush(&self, key: &str) -> Result<(), StorageError> {
        let write_err = |reason: String| StorageError::Write {
            key: key.to_string(),
            reason,
        };
        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| write_err(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| write_err(e.to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        self.flush(key)
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.entries.clear();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Clear(e.to_string())),
        }
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StorageError> {
        web_sys::window()
            .ok_or(StorageError::Unavailable)?
            .local_storage()
            .map_err(|_| StorageError::Unavailable)?
            .ok_or(StorageError::Unavailable)
    }
}

#[cfg(target_arch = "wasm32")]
fn js_reason(err: wasm_bindgen::JsValue) -> String {
    format!("{err:?}")
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Self::storage()?.get_item(key).map_err(|e| StorageError::Read {
            key: key.to_string(),
            reason: js_reason(e),
        })
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Self::storage()?.set_item(key, value).map_err(|e| StorageError::Write {
            key: key.to_string(),
            reason: js_reason(e),
        })
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        Self::storage()?
            .clear()
            .map_err(|e| StorageError::Clear(js_reason(e)))
    }
}
