//! Reconcile a stored achievement list with the canonical catalog
//!
//! For each canonical achievement:
//! - If the stored list has it unlocked, keep the unlock and its date
//! - Otherwise take the canonical (locked) definition as is
//!
//! Stored ids that are no longer in the catalog are dropped.

use std::collections::HashMap;

use super::definitions::{Achievement, ACHIEVEMENTS_VERSION};

/// Whether a list stored at `version` must go through [`merge`]
pub fn needs_migration(version: u32) -> bool {
    version < ACHIEVEMENTS_VERSION
}

/// Merge a stored achievement list into the canonical catalog
pub fn merge(persisted: &[Achievement], canonical: &[Achievement]) -> Vec<Achievement> {
    let stored: HashMap<&str, &Achievement> =
        persisted.iter().map(|a| (a.id.as_str(), a)).collect();

    for dropped in persisted
        .iter()
        .filter(|p| !canonical.iter().any(|c| c.id == p.id))
    {
        tracing::debug!("Dropping retired achievement {}", dropped.id);
    }

    canonical
        .iter()
        .map(|definition| {
            let mut merged = definition.clone();
            merged.unlocked = false;
            merged.date_unlocked = None;

            if let Some(existing) = stored.get(definition.id.as_str()).filter(|e| e.unlocked) {
                merged.unlocked = true;
                // Keep the invariant even for records that lost their date
                merged.date_unlocked = Some(existing.date_unlocked.unwrap_or(0));
            }
            merged
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::canonical_achievements;

    fn v1(id: &str, unlocked: bool, date: Option<i64>) -> Achievement {
        Achievement {
            id: id.to_string(),
            title: "old".to_string(),
            description: "old".to_string(),
            icon: String::new(),
            rarity: Default::default(),
            xp_reward: 0,
            unlocked,
            date_unlocked: date,
            condition: None,
        }
    }

    #[test]
    fn test_merge_v1_list() {
        let persisted = vec![
            v1("first_activity", true, Some(5)),
            v1("artist", true, Some(1_700_000_000_000)),
            v1("gamer", false, None),
        ];
        let merged = merge(&persisted, canonical_achievements());

        assert_eq!(merged.len(), canonical_achievements().len());
        assert!(merged.iter().all(|a| a.id != "first_activity"));

        let artist = merged.iter().find(|a| a.id == "artist").unwrap();
        assert!(artist.unlocked);
        assert_eq!(artist.date_unlocked, Some(1_700_000_000_000));
        assert_eq!(artist.title, "Artiste en herbe");
        assert!(artist.condition.is_some());

        let gamer = merged.iter().find(|a| a.id == "gamer").unwrap();
        assert!(!gamer.unlocked);
        assert!(gamer.date_unlocked.is_none());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let persisted = vec![
            v1("explorer", true, Some(9)),
            v1("creator", true, None),
            v1("ghost", true, Some(1)),
        ];
        let once = merge(&persisted, canonical_achievements());
        let twice = merge(&once, canonical_achievements());
        assert_eq!(once, twice);

        let creator = once.iter().find(|a| a.id == "creator").unwrap();
        assert_eq!(creator.date_unlocked, Some(0));
    }

    #[test]
    fn test_merge_empty_is_canonical() {
        assert_eq!(merge(&[], canonical_achievements()), canonical_achievements());
    }

    #[test]
    fn test_needs_migration() {
        assert!(needs_migration(0));
        assert!(needs_migration(1));
        assert!(!needs_migration(ACHIEVEMENTS_VERSION));
    }
}
