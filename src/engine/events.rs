//! Events emitted to engine observers

use crate::progress::Achievement;

/// A level up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
    pub new_title: String,
}

/// Something observers may react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// Emitted once at the end of every mutation
    StateChanged,
    XpAwarded { amount: u64, total: u64 },
    LevelUp(LevelUp),
    AchievementUnlocked(Achievement),
}
