//! Profile persistence
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐  schedule()  ┌─────────────┐  set()  ┌────────────────┐
//! │ ProgressEngine  │ ───────────▶ │  AutoSaver  │ ──────▶ │ KeyValueStore  │
//! └─────────────────┘              └─────────────┘         │ memory / file  │
//!          ▲               SnapshotStore::load()           │ / sqlite       │
//!          └───────────────────────────────────────────────└────────────────┘
//! ```
//!
//! Transports only move strings around. [`SnapshotStore`] owns the envelope
//! format and schema migration, and swallows transport errors: a failed
//! read loads a fresh profile, a failed write is logged and forgotten.

mod autosave;
mod file;
mod memory;
mod snapshot_store;
mod sqlite;

pub use autosave::AutoSaver;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use snapshot_store::{SnapshotStore, DEFAULT_STORAGE_KEY};
pub use sqlite::SqliteStore;

use std::sync::Arc;

use async_trait::async_trait;

/// Error type for storage transports
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Corrupt store: {0}")]
    Corrupt(String),
}

/// Async string-keyed store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value; `None` when the key is absent
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value; absent keys are not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key).await
    }
}
