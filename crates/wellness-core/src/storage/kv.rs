//! TOML-backed key-value store.
//!
//! State lives in one flat table at `~/.config/wellness-reminder/state.toml`
//! (keys are dotted strings, values are strings). Writes go through a
//! temporary file in the same directory followed by a rename, so a crash
//! mid-write leaves the last committed file intact.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{data_dir, SettingsStore};
use crate::error::StorageError;

const STATE_FILE: &str = "state.toml";

#[derive(Debug, Clone)]
pub struct TomlKvStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl TomlKvStore {
    /// Open (or create) the store at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => {
                toml::from_str(&content).map_err(|e| StorageError::LoadFailed {
                    path: path.clone(),
                    message: e.to_string(),
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(StorageError::LoadFailed {
                    path,
                    message: e.to_string(),
                })
            }
        };
        Ok(Self { path, values })
    }

    /// Open the store in the default data directory.
    pub fn open_default() -> Result<Self, StorageError> {
        Self::open(data_dir()?.join(STATE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StorageError> {
        let content = toml::to_string_pretty(&self.values).map_err(|e| {
            StorageError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;
        let tmp = self.path.with_extension("toml.tmp");
        std::fs::write(&tmp, content).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        std::fs::rename(&tmp, &self.path).map_err(|e| StorageError::SaveFailed {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        Ok(())
    }
}

impl SettingsStore for TomlKvStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}
