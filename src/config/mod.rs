//! Configuration loading and management

mod io;
mod settings;

pub use settings::{StorageBackend, StorageSettings};

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Default tracing filter (overridden by RUST_LOG and --verbose)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Where the profile lives
    #[serde(default)]
    pub storage: StorageSettings,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            storage: StorageSettings::default(),
        }
    }
}
