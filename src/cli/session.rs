//! Profile session shared by every command that touches the profile
//!
//! Opens the configured store, loads (and migrates) the profile, hands out
//! the engine, and on `finish` reports what happened and persists.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;

use mcl::config::{Config, StorageBackend, StorageSettings};
use mcl::engine::{EngineEvent, ProgressEngine};
use mcl::storage::{AutoSaver, JsonFileStore, KeyValueStore, MemoryStore, SnapshotStore, SqliteStore};

/// Open the transport named by the config
pub fn open_store(settings: &StorageSettings) -> Result<Arc<dyn KeyValueStore>> {
    let path = settings.resolved_path();
    let store: Arc<dyn KeyValueStore> = match settings.backend {
        StorageBackend::File => Arc::new(JsonFileStore::new(&path)),
        StorageBackend::Sqlite => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create storage directory: {}", parent.display())
                })?;
            }
            let store = SqliteStore::open(&path)
                .with_context(|| format!("Failed to open profile database: {}", path.display()))?;
            Arc::new(store)
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; nothing will be saved");
            Arc::new(MemoryStore::new())
        }
    };
    tracing::debug!("Profile storage: {} ({})", settings.backend, path.display());
    Ok(store)
}

pub struct Session {
    engine: ProgressEngine,
    events: mpsc::UnboundedReceiver<EngineEvent>,
    saver: AutoSaver,
}

impl Session {
    pub async fn open(config: &Config) -> Result<Self> {
        let store = open_store(&config.storage)?;
        let key = config.storage.key.clone();

        let state = SnapshotStore::new(store.clone(), key.clone())
            .load_or_default()
            .await;
        let mut engine = ProgressEngine::new(state);
        let events = engine.subscribe();
        let saver = AutoSaver::spawn(SnapshotStore::new(store, key));

        Ok(Self {
            engine,
            events,
            saver,
        })
    }

    pub fn engine(&self) -> &ProgressEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut ProgressEngine {
        &mut self.engine
    }

    /// Print progress, show then dismiss notifications, and save if needed
    pub async fn finish(mut self) -> Result<()> {
        let mut dirty = false;
        while let Ok(event) = self.events.try_recv() {
            match event {
                EngineEvent::StateChanged => dirty = true,
                EngineEvent::XpAwarded { amount, total } => {
                    println!("+{} XP ({} total)", amount, total);
                }
                EngineEvent::LevelUp(up) => {
                    println!(
                        "Level up! {} -> {} ({})",
                        up.old_level, up.new_level, up.new_title
                    );
                }
                // Shown below from the notification queue
                EngineEvent::AchievementUnlocked(_) => {}
            }
        }

        let pending = self.engine.pending_notifications().to_vec();
        for notification in &pending {
            let achievement = &notification.achievement;
            println!(
                "Achievement unlocked: {} {} [{}] +{} XP",
                achievement.icon,
                achievement.title,
                achievement.rarity.label(),
                achievement.xp_reward
            );
            if !achievement.description.is_empty() {
                println!("    {}", achievement.description);
            }
            self.engine.dismiss_notification(&notification.id);
        }

        if dirty {
            self.saver.schedule(self.engine.state());
        }
        let written = self.saver.flush().await;
        tracing::debug!("Profile writes: {}", written);
        Ok(())
    }
}
