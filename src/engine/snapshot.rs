//! Snapshot import/export and the persisted envelope
//!
//! A stored profile looks like `{"state": {...}, "version": 2}`. Export
//! writes the same envelope so an exported file can be imported back or
//! dropped in place of the profile file. Import also accepts a bare
//! snapshot object.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::state::EngineState;
use crate::domain::{CatalogItem, Establishment, UsageRecord};
use crate::progress::{
    canonical_achievements, merge, needs_migration, Achievement, ACHIEVEMENTS_VERSION,
};

/// Top-level keys that identify a snapshot
const SNAPSHOT_KEYS: &[&str] = &[
    "username",
    "profileImage",
    "xp",
    "level",
    "activityHistory",
    "customActivities",
    "etablissements",
    "achievements",
];

/// Error type for snapshot import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Snapshot must be a JSON object")]
    NotAnObject,

    #[error("No recognizable snapshot fields found")]
    Unrecognized,
}

/// Serialized engine state; every field is optional on the way in
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub xp: Option<u64>,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub activity_history: Option<Vec<UsageRecord>>,
    #[serde(default)]
    pub custom_activities: Option<Vec<CatalogItem>>,
    #[serde(default)]
    pub etablissements: Option<Vec<Establishment>>,
    #[serde(default)]
    pub achievements: Option<Vec<Achievement>>,
}

/// A parsed snapshot and the schema version it was written with, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedSnapshot {
    pub snapshot: Snapshot,
    pub version: Option<u32>,
}

/// On-disk wrapper around a snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedEnvelope<T> {
    pub state: T,
    #[serde(default)]
    pub version: u32,
}

impl Snapshot {
    /// Capture the persistable part of a state
    pub fn from_state(state: &EngineState) -> Self {
        Self {
            username: state.username.clone(),
            profile_image: state.profile_image.clone(),
            xp: Some(state.xp),
            level: Some(state.level),
            activity_history: Some(state.activity_history.clone()),
            custom_activities: Some(state.custom_activities.clone()),
            etablissements: Some(state.etablissements.clone()),
            achievements: Some(state.achievements.clone()),
        }
    }

    /// Parse an import file (envelope or bare snapshot)
    ///
    /// An envelope whose `version` is missing or not an integer is read as
    /// version 0, so its achievements go through migration.
    pub fn parse(content: &str) -> Result<ImportedSnapshot, ImportError> {
        let value: Value = serde_json::from_str(content)?;
        let Value::Object(mut root) = value else {
            return Err(ImportError::NotAnObject);
        };

        let (body, version) = match root.remove("state") {
            Some(state) => {
                // Same rule as the loader: an unversioned envelope is the oldest schema
                let version = root
                    .get("version")
                    .and_then(Value::as_u64)
                    .map_or(0, |v| v.min(u64::from(u32::MAX)) as u32);
                (state, Some(version))
            }
            None => (Value::Object(root), None),
        };

        let Value::Object(fields) = &body else {
            return Err(ImportError::NotAnObject);
        };
        if !SNAPSHOT_KEYS.iter().any(|key| fields.contains_key(*key)) {
            return Err(ImportError::Unrecognized);
        }

        let snapshot: Snapshot = serde_json::from_value(body)?;
        Ok(ImportedSnapshot { snapshot, version })
    }

    /// Build a state, defaulting whatever is missing
    ///
    /// Achievements written by an older schema are merged into the canonical
    /// catalog. A snapshot without a version is taken as is. The cached
    /// level is re-derived from `xp`.
    pub fn into_state(self, version: Option<u32>) -> EngineState {
        let achievements = match self.achievements {
            Some(list) if version.is_some_and(needs_migration) => {
                tracing::info!(
                    "Migrating achievements from v{} to v{}",
                    version.unwrap_or_default(),
                    ACHIEVEMENTS_VERSION
                );
                merge(&list, canonical_achievements())
            }
            Some(list) => list,
            None => canonical_achievements().to_vec(),
        };

        let mut state = EngineState {
            username: self.username,
            profile_image: self.profile_image,
            xp: self.xp.unwrap_or(0),
            level: self.level.unwrap_or(1),
            activity_history: self.activity_history.unwrap_or_default(),
            custom_activities: self.custom_activities.unwrap_or_default(),
            etablissements: self.etablissements.unwrap_or_default(),
            achievements,
            pending_notifications: Vec::new(),
        };
        if state.level != crate::progress::level_from_xp(state.xp).level {
            tracing::debug!("Stored level {} out of sync with xp {}", state.level, state.xp);
            state.sync_level();
        }
        state
    }
}

/// Serialize a state into the persisted envelope
pub fn encode_state(state: &EngineState) -> Result<String, serde_json::Error> {
    serde_json::to_string(&PersistedEnvelope {
        state,
        version: ACHIEVEMENTS_VERSION,
    })
}

/// Same as [`encode_state`], pretty-printed for export files
pub fn export_state(state: &EngineState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&PersistedEnvelope {
        state,
        version: ACHIEVEMENTS_VERSION,
    })
}

/// Parse a persisted envelope, migrating old achievement lists
///
/// A missing version is treated as the oldest schema.
pub fn decode_state(raw: &str) -> Result<EngineState, serde_json::Error> {
    let envelope: PersistedEnvelope<Snapshot> = serde_json::from_str(raw)?;
    Ok(envelope.state.into_state(Some(envelope.version)))
}
