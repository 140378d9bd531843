//! Background profile writer
//!
//! Mutations must not wait on disk. The engine's state is encoded right
//! away (so the write reflects the state at that moment) and handed to a
//! single writer task that applies writes in order. When several snapshots
//! queue up, only the newest is written.

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{KeyValueStore, SnapshotStore};
use crate::engine::{encode_state, EngineState};

/// Fire-and-forget saver for one profile key
pub struct AutoSaver {
    tx: mpsc::UnboundedSender<String>,
    handle: JoinHandle<usize>,
}

impl AutoSaver {
    /// Spawn the writer task on the current runtime
    pub fn spawn<S>(snapshots: SnapshotStore<S>) -> Self
    where
        S: KeyValueStore + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();
        let handle = tokio::spawn(async move {
            let mut written = 0;
            while let Some(mut payload) = rx.recv().await {
                // Skip over snapshots that are already stale
                while let Ok(newer) = rx.try_recv() {
                    payload = newer;
                }
                if snapshots.save_raw(&payload).await {
                    written += 1;
                }
            }
            written
        });
        Self { tx, handle }
    }

    /// Queue a save of the current state
    pub fn schedule(&self, state: &EngineState) {
        match encode_state(state) {
            Ok(payload) => {
                if self.tx.send(payload).is_err() {
                    tracing::warn!("Profile writer stopped; dropping save");
                }
            }
            Err(e) => tracing::warn!("Failed to serialize profile: {}", e),
        }
    }

    /// Wait for every queued save; returns how many writes succeeded
    pub async fn flush(self) -> usize {
        drop(self.tx);
        match self.handle.await {
            Ok(written) => written,
            Err(e) => {
                tracing::warn!("Profile writer crashed: {}", e);
                0
            }
        }
    }
}
