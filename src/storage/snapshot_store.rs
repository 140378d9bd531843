//! Versioned profile loader/saver on top of a [`KeyValueStore`]

use super::KeyValueStore;
use crate::engine::{decode_state, encode_state, EngineState};

/// Default record name, shared with the mobile app's file layout
pub const DEFAULT_STORAGE_KEY: &str = "mcl-user-storage";

/// Loads and saves one profile under a fixed key
///
/// Never fails: transport and parse errors are logged and the profile is
/// treated as absent (on load) or the write as skipped (on save).
pub struct SnapshotStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored profile, migrating old achievement lists
    pub async fn load(&self) -> Option<EngineState> {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("No stored profile under {}", self.key);
                return None;
            }
            Err(e) => {
                tracing::warn!("Failed to read profile {}: {}", self.key, e);
                return None;
            }
        };

        match decode_state(&raw) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("Ignoring unreadable profile {}: {}", self.key, e);
                None
            }
        }
    }

    /// Load the stored profile or start a fresh one
    pub async fn load_or_default(&self) -> EngineState {
        self.load().await.unwrap_or_default()
    }

    /// Persist a state; returns whether the write went through
    pub async fn save(&self, state: &EngineState) -> bool {
        let payload = match encode_state(state) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("Failed to serialize profile: {}", e);
                return false;
            }
        };
        self.save_raw(&payload).await
    }

    /// Persist an already encoded envelope
    pub async fn save_raw(&self, payload: &str) -> bool {
        match self.store.set(&self.key, payload).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save profile {}: {}", self.key, e);
                false
            }
        }
    }

    /// Remove the stored profile
    pub async fn clear(&self) {
        if let Err(e) = self.store.remove(&self.key).await {
            tracing::warn!("Failed to remove profile {}: {}", self.key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};
    use async_trait::async_trait;

    /// Transport that is always down
    struct BrokenStore;

    #[async_trait]
    impl KeyValueStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Corrupt("offline".into()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Corrupt("offline".into()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Corrupt("offline".into()))
        }
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let snapshots = SnapshotStore::new(MemoryStore::new(), DEFAULT_STORAGE_KEY);
        let mut state = EngineState::default();
        state.username = Some("Inès".to_string());
        state.xp = 215;
        state.sync_level();

        assert!(snapshots.save(&state).await);
        assert_eq!(snapshots.load().await, Some(state));

        snapshots.clear().await;
        assert_eq!(snapshots.load().await, None);
    }

    #[tokio::test]
    async fn test_unreadable_profile_is_absent() {
        let store = MemoryStore::new();
        store.set(DEFAULT_STORAGE_KEY, "{oops").await.unwrap();
        let snapshots = SnapshotStore::new(store, DEFAULT_STORAGE_KEY);

        assert_eq!(snapshots.load().await, None);
        assert_eq!(snapshots.load_or_default().await, EngineState::default());
    }

    #[tokio::test]
    async fn test_broken_transport_is_swallowed() {
        let snapshots = SnapshotStore::new(BrokenStore, DEFAULT_STORAGE_KEY);

        assert_eq!(snapshots.load().await, None);
        assert!(!snapshots.save(&EngineState::default()).await);
        snapshots.clear().await;
    }
}
