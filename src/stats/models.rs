//! Statistics data models

use serde::Serialize;

use crate::domain::UsageRecord;

/// Usage count for one activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityCount {
    pub activity_id: String,
    pub title: String,
    pub count: u64,
}

/// Usage count for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: u64,
}

/// Visit count for one establishment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EstablishmentCount {
    pub etablissement_id: String,
    pub name: String,
    pub count: u64,
}

/// Complete statistics for one profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_usages: u64,
    pub unique_activities: u64,
    pub active_days: u64,
    pub current_streak: u32,
    pub top_activities: Vec<ActivityCount>,
    pub categories: Vec<CategoryCount>,
    pub top_etablissements: Vec<EstablishmentCount>,
    pub recent: Vec<UsageRecord>,
    pub unlocked_achievements: u64,
    pub total_achievements: u64,
}

impl StatsSummary {
    /// Share of achievements unlocked, as a percentage
    pub fn completion_rate(&self) -> f64 {
        if self.total_achievements == 0 {
            0.0
        } else {
            (self.unlocked_achievements as f64 / self.total_achievements as f64) * 100.0
        }
    }
}
