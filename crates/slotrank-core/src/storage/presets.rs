//! Named request presets persisted as a single JSON file.
//!
//! Payloads are stored as opaque JSON values; nothing here interprets them.

use std::collections::BTreeMap;
use std::path::PathBuf;

use super::data_dir;
use crate::error::{CoreError, PresetError};

const MAX_KEY_LEN: usize = 64;

/// Key-value store of request payloads backed by `presets.json`.
#[derive(Debug, Clone)]
pub struct PresetStore {
    path: PathBuf,
    entries: BTreeMap<String, serde_json::Value>,
}

impl PresetStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PresetError> {
        let path = path.into();
        let entries = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| PresetError::Io {
                path: path.clone(),
                source,
            })?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content).map_err(|source| PresetError::Corrupt {
                    path: path.clone(),
                    source,
                })?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, entries })
    }

    /// Open `presets.json` in the data directory.
    pub fn open_default() -> Result<Self, CoreError> {
        let path = data_dir()?.join("presets.json");
        Ok(Self::open(path)?)
    }

    /// Store `payload` under `key`, replacing any previous entry.
    pub fn save(&mut self, key: &str, payload: serde_json::Value) -> Result<(), PresetError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), payload);
        self.persist()
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    /// Stored keys in ascending order.
    pub fn list(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    /// Remove `key`. Returns whether an entry existed.
    pub fn delete(&mut self, key: &str) -> Result<bool, PresetError> {
        if self.entries.remove(key).is_none() {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    fn persist(&self) -> Result<(), PresetError> {
        let io_err = |source| PresetError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(&self.entries).map_err(|source| {
            PresetError::Corrupt {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, json).map_err(io_err)
    }
}

fn validate_key(key: &str) -> Result<(), PresetError> {
    let valid = !key.is_empty()
        && key.len() <= MAX_KEY_LEN
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(PresetError::InvalidKey(key.to_string()))
    }
}
