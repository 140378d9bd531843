//! Storage settings

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Config;
use crate::storage::DEFAULT_STORAGE_KEY;

/// Which transport holds the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file shared with other records
    #[default]
    File,
    /// SQLite key-value table
    Sqlite,
    /// Nothing survives the process (dry runs)
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::File => "file",
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::Memory => "memory",
        }
    }

    /// File name used when no explicit path is configured
    fn default_file_name(&self) -> &'static str {
        match self {
            StorageBackend::File | StorageBackend::Memory => "profile_data.json",
            StorageBackend::Sqlite => "profile.db",
        }
    }
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[storage]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Explicit location; defaults to a file under ~/.mcl/
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Record name inside the store
    #[serde(default = "default_key")]
    pub key: String,
}

fn default_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            key: default_key(),
        }
    }
}

impl StorageSettings {
    /// Configured path, or the backend's default under the config dir
    pub fn resolved_path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| Config::global_config_dir().join(self.backend.default_file_name()))
    }
}
