//! External key-value storage
//!
//! History and preferences live outside the catalog in a small string-keyed
//! store. [`JsonFileStore`] persists to a single JSON object on disk;
//! [`MemoryStore`] is for tests and ephemeral hosts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Result, ResultExt, StorybookError};

pub trait KeyValueStore: Send + Sync {
    /// `Ok(None)` when the key has never been written.
    fn get(&self, key: &str) -> Result<Option<Value>>;
    fn set(&self, key: &str, value: Value) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        self.values.lock().insert(key.to_string(), value);
        Ok(())
    }
}

/// Key-value store backed by one JSON file.
///
/// The whole map is cached in memory and rewritten on every `set` using an
/// atomic write (temp file + rename).
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: Mutex<HashMap<String, Value>>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged, moved aside to `<path>.corrupt` and also treated as empty, so
    /// a damaged history never keeps the catalog from opening.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            match Self::read(&path) {
                Ok(values) => {
                    info!(path = %path.display(), key_count = values.len(), "Loaded key-value store");
                    values
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "Key-value store is unreadable, starting fresh"
                    );
                    let backup = path.with_extension("json.corrupt");
                    std::fs::rename(&path, &backup)
                        .map_err(|e| StorybookError::storage(&backup, e))
                        .log_err();
                    HashMap::new()
                }
            }
        } else {
            info!(path = %path.display(), "Key-value store not found, starting fresh");
            HashMap::new()
        };

        Self {
            path,
            values: Mutex::new(values),
        }
    }

    fn read(path: &Path) -> Result<HashMap<String, Value>> {
        let content = std::fs::read_to_string(path).map_err(|e| StorybookError::storage(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, values: &HashMap<String, Value>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StorybookError::storage(parent, e))?;
        }

        let json = serde_json::to_string(values)?;
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, &json).map_err(|e| StorybookError::storage(&temp_path, e))?;
        std::fs::rename(&temp_path, &self.path)
            .map_err(|e| StorybookError::storage(&self.path, e))?;

        debug!(path = %self.path.display(), bytes = json.len(), "Saved key-value store (atomic)");
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<()> {
        // hold the lock across the write so concurrent sets cannot reorder on disk
        let mut values = self.values.lock();
        values.insert(key.to_string(), value);
        self.write(&values)
    }
}
