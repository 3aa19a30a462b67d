//! Settings and flag persistence.
//!
//! Everything durable flows through the [`SettingsStore`] key-value
//! contract: per-track settings bundles, clock-aligned last-fired markers,
//! and the easter-egg unlock flags. The file-backed implementation lives in
//! [`kv`]; [`MemoryStore`] covers tests and the storage-unavailable
//! degraded mode.

mod kv;

pub use kv::TomlKvStore;

use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::StorageError;

/// Key-value contract consumed by the coordinator and the unlock gate.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Persist one value. Implementations commit durably before returning;
    /// a failed write leaves the previous committed state intact.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Session-only store: nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Returns `~/.config/wellness-reminder[-dev]/` based on WELLNESS_ENV.
///
/// Set WELLNESS_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("WELLNESS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("wellness-reminder-dev")
    } else {
        base_dir.join("wellness-reminder")
    };

    std::fs::create_dir_all(&dir).map_err(|e| StorageError::Unavailable(e.to_string()))?;
    Ok(dir)
}
