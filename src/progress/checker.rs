//! Achievement checking logic
//!
//! The engine condenses its state into an [`EvaluationContext`], then
//! [`evaluate`] flips every locked achievement whose condition now holds.

use std::collections::{HashMap, HashSet};

use super::definitions::{canonical_condition, Achievement, Condition};
use super::levels::level_from_xp;
use crate::catalog::CatalogLookup;
use crate::domain::UsageRecord;

/// Aggregates the unlock conditions are checked against
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationContext {
    pub usage_count: u64,
    pub unique_activities: u64,
    pub unique_etabs: u64,
    /// Usages per category; usages of unknown activities are not counted
    pub category_counts: HashMap<String, u64>,
    pub etab_count: u64,
    pub custom_activities: u64,
    pub level: u64,
}

impl EvaluationContext {
    /// Derive aggregates from the raw state
    pub fn from_parts(
        history: &[UsageRecord],
        etab_count: usize,
        custom_activity_count: usize,
        xp: u64,
        catalog: &(impl CatalogLookup + ?Sized),
    ) -> Self {
        let mut activities = HashSet::new();
        let mut etabs = HashSet::new();
        let mut category_counts: HashMap<String, u64> = HashMap::new();

        for usage in history {
            activities.insert(usage.activity_id.as_str());
            if let Some(etab) = usage.etablissement_id.as_deref() {
                etabs.insert(etab);
            }
            if let Some(activity) = catalog.lookup(&usage.activity_id) {
                *category_counts.entry(activity.category.clone()).or_default() += 1;
            }
        }

        Self {
            usage_count: history.len() as u64,
            unique_activities: activities.len() as u64,
            unique_etabs: etabs.len() as u64,
            category_counts,
            etab_count: etab_count as u64,
            custom_activities: custom_activity_count as u64,
            level: u64::from(level_from_xp(xp).level),
        }
    }

    pub fn category_count(&self, category: &str) -> u64 {
        self.category_counts.get(category).copied().unwrap_or(0)
    }

    /// Current value of the aggregate a condition looks at
    pub fn progress(&self, condition: &Condition) -> u64 {
        match condition {
            Condition::UsageCount { .. } => self.usage_count,
            Condition::UniqueActivities { .. } => self.unique_activities,
            Condition::UniqueEtabs { .. } => self.unique_etabs,
            Condition::CategoryCount { category, .. } => self.category_count(category),
            Condition::EtabCount { .. } => self.etab_count,
            Condition::CustomActivities { .. } => self.custom_activities,
            Condition::Level { .. } => self.level,
        }
    }

    pub fn is_met(&self, condition: &Condition) -> bool {
        self.progress(condition) >= condition.target()
    }
}

/// Condition used for an achievement: its own, else the canonical one
fn condition_of(achievement: &Achievement) -> Option<&Condition> {
    achievement
        .condition
        .as_ref()
        .or_else(|| canonical_condition(&achievement.id))
}

/// Unlock every locked achievement whose condition is met
///
/// Returns the newly unlocked achievements, in catalog order. When nothing
/// qualifies the slice is left untouched.
pub fn evaluate(
    achievements: &mut [Achievement],
    ctx: &EvaluationContext,
    now: i64,
) -> Vec<Achievement> {
    let mut newly_unlocked = Vec::new();

    for achievement in achievements.iter_mut() {
        if achievement.unlocked {
            continue;
        }
        let Some(condition) = condition_of(achievement).cloned() else {
            continue;
        };
        if ctx.is_met(&condition) && achievement.unlock(now) {
            tracing::debug!(
                "Condition met for {} ({} >= {})",
                achievement.id,
                ctx.progress(&condition),
                condition.target()
            );
            newly_unlocked.push(achievement.clone());
        }
    }

    newly_unlocked
}
