//! Summary computation

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;

use super::models::{ActivityCount, CategoryCount, EstablishmentCount, StatsSummary};
use super::{RECENT_USAGES, TOP_ACTIVITIES, TOP_ETABLISSEMENTS};
use crate::catalog::CatalogLookup;
use crate::domain::{Establishment, UsageRecord};
use crate::progress::{active_days, daily_streak, Achievement};

impl StatsSummary {
    /// Compute every statistic in one pass over the history
    pub fn compute(
        history: &[UsageRecord],
        catalog: &(impl CatalogLookup + ?Sized),
        etablissements: &[Establishment],
        achievements: &[Achievement],
        today: NaiveDate,
    ) -> Self {
        let mut by_activity: HashMap<&str, u64> = HashMap::new();
        let mut by_category: HashMap<&str, u64> = HashMap::new();
        let mut by_etab: HashMap<&str, u64> = HashMap::new();

        for usage in history {
            *by_activity.entry(usage.activity_id.as_str()).or_default() += 1;
            // Deleted activities have no category
            if let Some(item) = catalog.lookup(&usage.activity_id) {
                *by_category.entry(item.category.as_str()).or_default() += 1;
            }
            if let Some(etab_id) = usage.etablissement_id.as_deref() {
                *by_etab.entry(etab_id).or_default() += 1;
            }
        }

        let unique_activities = history
            .iter()
            .map(|u| u.activity_id.as_str())
            .collect::<HashSet<_>>()
            .len() as u64;

        // Deleted activities and establishments don't take ranking slots
        let top_activities = ranked(by_activity, TOP_ACTIVITIES, |id| catalog.lookup(id))
            .into_iter()
            .map(|(id, item, count)| ActivityCount {
                activity_id: id.to_string(),
                title: item.title.clone(),
                count,
            })
            .collect();

        let categories = ranked(by_category, usize::MAX, Some)
            .into_iter()
            .map(|(category, _, count)| CategoryCount {
                category: category.to_string(),
                count,
            })
            .collect();

        let top_etablissements = ranked(by_etab, TOP_ETABLISSEMENTS, |id| {
            etablissements.iter().find(|e| e.id == id)
        })
        .into_iter()
        .map(|(id, etab, count)| EstablishmentCount {
            etablissement_id: id.to_string(),
            name: etab.name.clone(),
            count,
        })
        .collect();

        let mut recent: Vec<UsageRecord> = history
            .iter()
            .filter(|u| catalog.lookup(&u.activity_id).is_some())
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(RECENT_USAGES);

        Self {
            total_usages: history.len() as u64,
            unique_activities,
            active_days: active_days(history).len() as u64,
            current_streak: daily_streak(history, today),
            top_activities,
            categories,
            top_etablissements,
            recent,
            unlocked_achievements: achievements.iter().filter(|a| a.unlocked).count() as u64,
            total_achievements: achievements.len() as u64,
        }
    }
}

/// Sort counts descending (ties by key), drop keys `resolve` can't find,
/// then keep the first `limit`
fn ranked<'k, T>(
    counts: HashMap<&'k str, u64>,
    limit: usize,
    resolve: impl Fn(&'k str) -> Option<T>,
) -> Vec<(&'k str, T, u64)> {
    let mut entries: Vec<_> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
        .into_iter()
        .filter_map(|(key, count)| resolve(key).map(|found| (key, found, count)))
        .take(limit)
        .collect()
}
