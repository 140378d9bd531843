//! Single-file JSON store
//!
//! All keys live in one JSON object on disk (`{"<key>": <json value>}`), so
//! every write is a read-modify-write of the whole file. Writes are
//! serialized in-process by a mutex and across processes by an exclusive
//! lock on a sidecar `.lock` file, then land through temp file + rename.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use fs2::FileExt;
use serde_json::{Map, Value};
use tokio::sync::Mutex;

use super::{KeyValueStore, StorageError};

/// Store backed by one JSON document on disk
///
/// Values must be JSON documents themselves; they are nested as-is inside
/// the file rather than double-encoded.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run a blocking read-modify-write of the blob
    async fn update<F>(&self, apply: F) -> Result<(), StorageError>
    where
        F: FnOnce(&mut Map<String, Value>) + Send + 'static,
    {
        let _guard = self.write_lock.lock().await;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || update_blob(&path, apply)).await?
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path.clone();
        let key = key.to_string();
        tokio::task::spawn_blocking(move || {
            let Some(blob) = read_blob_locked(&path)? else {
                return Ok(None);
            };
            blob.get(&key)
                .map(serde_json::to_string)
                .transpose()
                .map_err(StorageError::from)
        })
        .await?
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let document: Value = serde_json::from_str(value)?;
        let key = key.to_string();
        self.update(move |blob| {
            blob.insert(key, document);
        })
        .await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if !self.path.exists() {
            return Ok(());
        }
        let key = key.to_string();
        self.update(move |blob| {
            blob.remove(&key);
        })
        .await
    }
}

fn lock_path(path: &Path) -> PathBuf {
    path.with_extension("json.lock")
}

fn open_lock_file(path: &Path) -> Result<File, StorageError> {
    Ok(OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(lock_path(path))?)
}

fn parse_blob(path: &Path) -> Result<Option<Map<String, Value>>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Some(Map::new()));
    }
    match serde_json::from_str(&content)? {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(StorageError::Corrupt(format!(
            "{} is not a JSON object",
            path.display()
        ))),
    }
}

fn read_blob_locked(path: &Path) -> Result<Option<Map<String, Value>>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let lock_file = open_lock_file(path)?;
    lock_file.lock_shared()?;
    // Lock is released when lock_file is dropped
    parse_blob(path)
}

fn update_blob<F>(path: &Path, apply: F) -> Result<(), StorageError>
where
    F: FnOnce(&mut Map<String, Value>),
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let lock_file = open_lock_file(path)?;
    lock_file.lock_exclusive()?;

    let mut blob = parse_blob(path)?.unwrap_or_default();
    apply(&mut blob);
    let content = serde_json::to_string_pretty(&Value::Object(blob))?;

    // Write to temp file first (atomic write pattern)
    let temp_path = path.with_extension("json.tmp");
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.sync_all()?;

    std::fs::rename(&temp_path, path)?;
    Ok(())
}
