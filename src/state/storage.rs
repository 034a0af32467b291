//! Device-local storage
//!
//! A small string key/value store persisted as one JSON object on disk. It holds
//! the device's display name and nothing else the backend could own.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, error};
use crate::config::StorageConfig;
use crate::utils::errors::{ChatError, Result};

/// File-backed key/value storage
#[derive(Debug, Clone)]
pub struct LocalStorage {
    path: PathBuf,
}

impl LocalStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read one value; a missing file reads as empty storage
    pub async fn get_item(&self, key: &str) -> Result<Option<String>> {
        let mut items = self.load().await?;
        let value = items.remove(key);
        debug!(key = key, found = value.is_some(), "Local storage read");
        Ok(value)
    }

    /// Write one value, replacing the file atomically
    pub async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.load().await?;
        items.insert(key.to_string(), value.to_string());
        self.store(&items).await?;
        debug!(key = key, "Local storage write");
        Ok(())
    }

    async fn load(&self) -> Result<HashMap<String, String>> {
        match fs::read_to_string(&self.path).await {
            Ok(data) => serde_json::from_str(&data).map_err(|e| {
                error!(path = %self.path.display(), error = %e, "Local storage file is corrupt");
                ChatError::Storage(format!("Corrupt storage file {}: {}", self.path.display(), e))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(ChatError::Storage(format!("Cannot read {}: {}", self.path.display(), e))),
        }
    }

    async fn store(&self, items: &HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let serialized = serde_json::to_string_pretty(items)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serialized).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}
