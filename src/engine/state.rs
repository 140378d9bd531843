//! The persisted aggregate

use serde::{Deserialize, Serialize};

use crate::domain::{CatalogItem, Establishment, UsageRecord};
use crate::progress::{canonical_achievements, level_from_xp, Achievement};

/// An achievement waiting to be shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementNotification {
    pub id: String,
    pub achievement: Achievement,
    /// Epoch milliseconds
    pub timestamp: i64,
}

impl AchievementNotification {
    pub fn new(achievement: Achievement, timestamp: i64) -> Self {
        Self {
            id: format!("{}_{}", achievement.id, timestamp),
            achievement,
            timestamp,
        }
    }
}

/// Everything the engine knows about one profile
///
/// `level` is a cache of `level_from_xp(xp).level` and is kept in sync by
/// every mutation. `pending_notifications` never leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineState {
    pub username: Option<String>,
    pub profile_image: Option<String>,
    pub xp: u64,
    pub level: u32,
    pub activity_history: Vec<UsageRecord>,
    pub custom_activities: Vec<CatalogItem>,
    pub etablissements: Vec<Establishment>,
    pub achievements: Vec<Achievement>,
    #[serde(skip)]
    pub pending_notifications: Vec<AchievementNotification>,
}

impl Default for EngineState {
    fn default() -> Self {
        Self {
            username: None,
            profile_image: None,
            xp: 0,
            level: 1,
            activity_history: Vec::new(),
            custom_activities: Vec::new(),
            etablissements: Vec::new(),
            achievements: canonical_achievements().to_vec(),
            pending_notifications: Vec::new(),
        }
    }
}

impl EngineState {
    /// Re-derive the cached level from `xp`
    pub fn sync_level(&mut self) {
        self.level = level_from_xp(self.xp).level;
    }

    /// Onboarding is done once a username is set
    pub fn is_onboarded(&self) -> bool {
        self.username.is_some()
    }

    pub fn unlocked_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.unlocked).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = EngineState::default();
        assert_eq!(state.xp, 0);
        assert_eq!(state.level, 1);
        assert!(!state.is_onboarded());
        assert_eq!(state.achievements.len(), canonical_achievements().len());
        assert_eq!(state.unlocked_count(), 0);
    }

    #[test]
    fn test_notifications_not_serialized() {
        let mut state = EngineState::default();
        let achievement = state.achievements[0].clone();
        state
            .pending_notifications
            .push(AchievementNotification::new(achievement, 1));

        let json = serde_json::to_value(&state).unwrap();
        assert!(json.get("pendingNotifications").is_none());
        assert!(json.get("activityHistory").is_some());
        assert_eq!(json["username"], serde_json::Value::Null);
    }
}
