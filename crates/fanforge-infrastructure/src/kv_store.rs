//! Key-value storage backends.
//!
//! [`FileKeyValueStore`] persists each key as one file beneath a base
//! directory; [`MemoryKeyValueStore`] backs tests and hosts without a
//! writable filesystem.

use fanforge_core::error::{ForgeError, Result};
use fanforge_core::storage::KeyValueStore;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

/// File-backed key-value store.
///
/// Each key maps to a single file under the base directory. Keys are
/// used as file names verbatim, so callers stick to path-safe keys
/// (the project blob key is the only one in use).
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store over an explicit base directory.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Creates a store over the default data directory,
    /// `~/.local/share/fanforge` (platform equivalent via `dirs`).
    pub fn default_location() -> Result<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ForgeError::config("Cannot find data directory"))?;
        Ok(Self::new(data_dir.join("fanforge")))
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(key)
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            ForgeError::persistence(format!("Failed to read {:?}: {}", path, e))
        })?;
        Ok(Some(content))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        if !self.base_dir.exists() {
            tokio::fs::create_dir_all(&self.base_dir).await.map_err(|e| {
                ForgeError::persistence(format!(
                    "Failed to create data directory at {:?}: {}",
                    self.base_dir, e
                ))
            })?;
        }
        let path = self.path_for(key);
        tokio::fs::write(&path, value).await.map_err(|e| {
            ForgeError::persistence(format!("Failed to write {:?}: {}", path, e))
        })?;
        Ok(())
    }
}

/// In-memory key-value store for tests and capability-less hosts.
#[derive(Default, Clone)]
pub struct MemoryKeyValueStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, bypassing the trait. Test convenience.
    pub async fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MemoryKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A store whose writes always fail, for exercising quota-rejection
/// paths. Reads delegate to an inner [`MemoryKeyValueStore`].
#[derive(Default, Clone)]
pub struct RejectingKeyValueStore {
    pub inner: MemoryKeyValueStore,
}

#[async_trait::async_trait]
impl KeyValueStore for RejectingKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<()> {
        Err(ForgeError::persistence("Storage quota exceeded"))
    }
}
