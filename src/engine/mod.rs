//! Progress engine - owns a profile's state and applies every mutation
//!
//! Each mutator runs to completion synchronously: apply the change, award
//! XP, re-check achievements, credit their bonus XP, re-check again until
//! nothing new unlocks. Observers get an [`EngineEvent::StateChanged`] at the
//! end of every mutation; persisting the result is up to them.

mod events;
mod snapshot;
mod state;

pub use events::{EngineEvent, LevelUp};
pub use snapshot::{
    decode_state, encode_state, export_state, ImportError, ImportedSnapshot, PersistedEnvelope,
    Snapshot,
};
pub use state::{AchievementNotification, EngineState};

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tokio::sync::mpsc;

use crate::catalog::{reference_catalog, LayeredCatalog};
use crate::domain::{CatalogItem, Establishment, UsageRecord};
use crate::progress::{evaluate, level_title, Achievement, EvaluationContext, LevelInfo, XpRewards};
use crate::stats::StatsSummary;

/// Source of "now" in epoch milliseconds
pub type Clock = Arc<dyn Fn() -> i64 + Send + Sync>;

/// Owns one profile and applies mutations to it
pub struct ProgressEngine {
    state: EngineState,
    reference: Arc<[CatalogItem]>,
    clock: Clock,
    observers: Vec<mpsc::UnboundedSender<EngineEvent>>,
}

impl Default for ProgressEngine {
    fn default() -> Self {
        Self::new(EngineState::default())
    }
}

impl ProgressEngine {
    /// Wrap an existing state, using the built-in reference catalogue
    pub fn new(state: EngineState) -> Self {
        Self {
            state,
            reference: Arc::from(reference_catalog()),
            clock: Arc::new(|| Utc::now().timestamp_millis()),
            observers: Vec::new(),
        }
    }

    /// Replace the reference catalogue used for category lookups
    pub fn with_reference_catalog(mut self, reference: impl Into<Arc<[CatalogItem]>>) -> Self {
        self.reference = reference.into();
        self
    }

    /// Replace the clock (tests, replays)
    pub fn with_clock(mut self, clock: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Receive events for every subsequent mutation
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<EngineEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers.push(tx);
        rx
    }

    // ========================================
    // ACCESSORS
    // ========================================

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn into_state(self) -> EngineState {
        self.state
    }

    pub fn level_info(&self) -> LevelInfo {
        LevelInfo::for_xp(self.state.xp)
    }

    pub fn pending_notifications(&self) -> &[AchievementNotification] {
        &self.state.pending_notifications
    }

    /// Reference catalogue with the custom activities layered on top
    pub fn catalog(&self) -> LayeredCatalog<'_> {
        LayeredCatalog::new(&self.reference, &self.state.custom_activities)
    }

    /// Look up an activity in the reference or custom catalogue
    pub fn activity(&self, id: &str) -> Option<&CatalogItem> {
        self.catalog().get(id)
    }

    /// Every activity, reference entries first
    pub fn all_activities(&self) -> Vec<&CatalogItem> {
        self.catalog().all()
    }

    /// Usage statistics as of `today` (UTC)
    pub fn stats(&self, today: NaiveDate) -> StatsSummary {
        StatsSummary::compute(
            &self.state.activity_history,
            &self.catalog(),
            &self.state.etablissements,
            &self.state.achievements,
            today,
        )
    }

    /// Number of recorded usages of one activity
    pub fn usage_count_for(&self, activity_id: &str) -> usize {
        self.state
            .activity_history
            .iter()
            .filter(|u| u.activity_id == activity_id)
            .count()
    }

    // ========================================
    // PROFILE
    // ========================================

    pub fn set_username(&mut self, name: impl Into<String>) {
        self.state.username = Some(name.into());
        self.changed();
    }

    pub fn set_profile_image(&mut self, uri: Option<String>) {
        self.state.profile_image = uri;
        self.changed();
    }

    // ========================================
    // ESTABLISHMENTS
    // ========================================

    /// Insert an establishment (replacing one with the same id)
    pub fn add_establishment(&mut self, etablissement: Establishment) {
        upsert(&mut self.state.etablissements, etablissement, |e| &e.id);
        self.run_achievement_checks();
        self.changed();
    }

    /// Replace an establishment by id; unknown ids are ignored
    pub fn update_establishment(&mut self, etablissement: Establishment) -> bool {
        let updated = replace(&mut self.state.etablissements, etablissement, |e| &e.id);
        if updated {
            self.changed();
        }
        updated
    }

    /// Unlocked achievements are not revoked
    pub fn remove_establishment(&mut self, id: &str) -> bool {
        let before = self.state.etablissements.len();
        self.state.etablissements.retain(|e| e.id != id);
        let removed = self.state.etablissements.len() != before;
        if removed {
            self.changed();
        }
        removed
    }

    // ========================================
    // CUSTOM ACTIVITIES
    // ========================================

    /// Insert a custom activity (replacing one with the same id)
    pub fn add_custom_activity(&mut self, item: CatalogItem) {
        upsert(&mut self.state.custom_activities, item, |i| &i.id);
        self.run_achievement_checks();
        self.changed();
    }

    /// Replace a custom activity by id; unknown ids are ignored
    pub fn update_custom_activity(&mut self, item: CatalogItem) -> bool {
        let updated = replace(&mut self.state.custom_activities, item, |i| &i.id);
        if updated {
            self.changed();
        }
        updated
    }

    /// History entries pointing at the removed activity are kept
    pub fn remove_custom_activity(&mut self, id: &str) -> bool {
        let before = self.state.custom_activities.len();
        self.state.custom_activities.retain(|i| i.id != id);
        let removed = self.state.custom_activities.len() != before;
        if removed {
            self.changed();
        }
        removed
    }

    // ========================================
    // USAGE & XP
    // ========================================

    /// Log one usage of an activity and award the usage XP
    ///
    /// `timestamp` backdates the record; it defaults to now.
    pub fn record_usage(
        &mut self,
        activity_id: impl Into<String>,
        timestamp: Option<i64>,
        etablissement_id: Option<String>,
    ) -> UsageRecord {
        let date = timestamp.unwrap_or_else(|| self.now());
        let record = UsageRecord::new(activity_id, date, etablissement_id);
        tracing::debug!("Recording usage {} of {}", record.id, record.activity_id);

        self.state.activity_history.push(record.clone());
        self.credit_xp(XpRewards::USAGE);
        self.run_achievement_checks();
        self.changed();
        record
    }

    /// Add XP, then check for achievements the new level unlocks
    pub fn award_xp(&mut self, amount: u64) {
        self.credit_xp(amount);
        self.run_achievement_checks();
        self.changed();
    }

    /// Unlock every achievement whose condition now holds
    ///
    /// Returns what was unlocked by this call.
    pub fn check_achievements(&mut self) -> Vec<Achievement> {
        let unlocked = self.run_achievement_checks();
        if !unlocked.is_empty() {
            self.changed();
        }
        unlocked
    }

    // ========================================
    // NOTIFICATIONS & LIFECYCLE
    // ========================================

    /// Drop a pending notification; unknown ids are ignored
    pub fn dismiss_notification(&mut self, id: &str) {
        let before = self.state.pending_notifications.len();
        self.state.pending_notifications.retain(|n| n.id != id);
        if self.state.pending_notifications.len() != before {
            self.changed();
        }
    }

    /// Wipe the profile back to a fresh state
    ///
    /// Irreversible; confirming with the user is the caller's job.
    pub fn reset_progress(&mut self) {
        tracing::info!("Resetting progress");
        self.state = EngineState::default();
        self.changed();
    }

    /// Replace the state with an imported snapshot
    ///
    /// Imported achievement states are trusted: no checks run.
    pub fn import_state(&mut self, imported: ImportedSnapshot) {
        self.state = imported.snapshot.into_state(imported.version);
        tracing::info!(
            "Imported profile: {} XP, {} usages, {} achievements unlocked",
            self.state.xp,
            self.state.activity_history.len(),
            self.state.unlocked_count()
        );
        self.changed();
    }

    /// Parse and import an export file; leaves the state untouched on error
    pub fn import_json(&mut self, content: &str) -> Result<(), ImportError> {
        let imported = Snapshot::parse(content)?;
        self.import_state(imported);
        Ok(())
    }

    /// Snapshot of the persistable state
    pub fn export_snapshot(&self) -> Snapshot {
        Snapshot::from_state(&self.state)
    }

    // ========================================
    // INTERNALS
    // ========================================

    fn now(&self) -> i64 {
        (self.clock)()
    }

    fn evaluation_context(&self) -> EvaluationContext {
        EvaluationContext::from_parts(
            &self.state.activity_history,
            self.state.etablissements.len(),
            self.state.custom_activities.len(),
            self.state.xp,
            &self.catalog(),
        )
    }

    /// Add XP without checking achievements
    fn credit_xp(&mut self, amount: u64) {
        if amount == 0 {
            return;
        }
        let old_level = self.state.level;
        self.state.xp = self.state.xp.saturating_add(amount);
        self.state.sync_level();
        self.emit(EngineEvent::XpAwarded {
            amount,
            total: self.state.xp,
        });

        if self.state.level > old_level {
            tracing::info!("Level up: {} -> {}", old_level, self.state.level);
            self.emit(EngineEvent::LevelUp(LevelUp {
                old_level,
                new_level: self.state.level,
                new_title: level_title(self.state.level).to_string(),
            }));
        }
    }

    /// Evaluate, notify, credit bonus XP, repeat until a pass unlocks nothing
    ///
    /// Every productive pass unlocks at least one achievement, so the number
    /// of passes is bounded by the catalog size.
    fn run_achievement_checks(&mut self) -> Vec<Achievement> {
        let mut all_unlocked = Vec::new();
        let max_passes = self.state.achievements.len() + 1;

        for _ in 0..max_passes {
            let now = self.now();
            let ctx = self.evaluation_context();
            let newly_unlocked = evaluate(&mut self.state.achievements, &ctx, now);
            if newly_unlocked.is_empty() {
                break;
            }

            let mut bonus = 0u64;
            for achievement in &newly_unlocked {
                tracing::info!(
                    "Achievement unlocked: {} (+{} XP)",
                    achievement.title,
                    achievement.xp_reward
                );
                bonus = bonus.saturating_add(achievement.xp_reward);
                self.state
                    .pending_notifications
                    .push(AchievementNotification::new(achievement.clone(), now));
                self.emit(EngineEvent::AchievementUnlocked(achievement.clone()));
            }
            self.credit_xp(bonus);
            all_unlocked.extend(newly_unlocked);
        }

        all_unlocked
    }

    fn emit(&mut self, event: EngineEvent) {
        self.observers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn changed(&mut self) {
        self.emit(EngineEvent::StateChanged);
    }
}

/// Insert or replace by key
fn upsert<T>(items: &mut Vec<T>, item: T, key: impl Fn(&T) -> &String) {
    match items.iter().position(|existing| key(existing) == key(&item)) {
        Some(index) => items[index] = item,
        None => items.push(item),
    }
}

/// Replace by key; false if the key is unknown
fn replace<T>(items: &mut [T], item: T, key: impl Fn(&T) -> &String) -> bool {
    match items.iter().position(|existing| key(existing) == key(&item)) {
        Some(index) => {
            items[index] = item;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ActivityType;

    fn engine() -> ProgressEngine {
        ProgressEngine::default().with_clock(|| 1_000)
    }

    fn unlocked_ids(engine: &ProgressEngine) -> Vec<&str> {
        engine
            .state()
            .achievements
            .iter()
            .filter(|a| a.unlocked)
            .map(|a| a.id.as_str())
            .collect()
    }

    #[test]
    fn test_record_usage_awards_xp() {
        let mut engine = engine();
        let record = engine.record_usage("c1", Some(42), Some("e1".to_string()));

        assert_eq!(record.date, 42);
        assert_eq!(engine.state().activity_history.len(), 1);
        assert_eq!(engine.state().xp, 25);
        assert_eq!(engine.usage_count_for("c1"), 1);
    }

    #[test]
    fn test_record_usage_defaults_to_now() {
        let mut engine = engine();
        let record = engine.record_usage("c2", None, None);
        assert_eq!(record.date, 1_000);
        assert!(record.etablissement_id.is_none());
    }

    #[test]
    fn test_explorer_scenario() {
        let mut engine = engine();
        for activity in ["c1", "c2", "c3"] {
            engine.record_usage(activity, Some(0), None);
        }

        assert_eq!(unlocked_ids(&engine), vec!["explorer"]);
        assert_eq!(engine.state().xp, 150);
        assert_eq!(engine.state().level, 2);

        let notifications = engine.pending_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].achievement.id, "explorer");
        assert_eq!(notifications[0].achievement.xp_reward, 75);
        assert_eq!(notifications[0].timestamp, 1_000);
    }

    #[test]
    fn test_award_xp_levels_up() {
        let mut engine = engine();
        engine.award_xp(100);

        assert_eq!(engine.state().level, 2);
        assert_eq!(engine.level_info().current_level_xp, 0);
        assert!(unlocked_ids(&engine).is_empty());
    }

    #[test]
    fn test_level_achievement_bonus() {
        let mut engine = engine();
        engine.award_xp(499);

        assert_eq!(unlocked_ids(&engine), vec!["level_5"]);
        assert_eq!(engine.state().xp, 599);
        assert_eq!(engine.state().level, 5);
    }

    #[test]
    fn test_bonus_xp_cascades_into_second_pass() {
        let mut engine = engine();
        // Level 9; the level_5 bonus pushes it to exactly level 10
        engine.award_xp(1576);

        assert_eq!(unlocked_ids(&engine), vec!["level_5", "level_10"]);
        assert_eq!(engine.state().xp, 1576 + 100 + 250);
        assert_eq!(engine.state().level, 10);
        assert_eq!(engine.pending_notifications().len(), 2);
    }

    #[test]
    fn test_check_achievements_idempotent() {
        let mut engine = engine();
        for activity in ["c1", "c2", "c3"] {
            engine.record_usage(activity, None, None);
        }
        let notifications = engine.pending_notifications().len();

        assert!(engine.check_achievements().is_empty());
        assert!(engine.check_achievements().is_empty());
        assert_eq!(engine.pending_notifications().len(), notifications);
    }

    #[test]
    fn test_establishment_crud() {
        let mut engine = engine();
        engine.add_establishment(Establishment::new("e1", "Centre Jules Verne", "centre"));

        assert_eq!(unlocked_ids(&engine), vec!["first_etab"]);
        assert_eq!(engine.state().xp, 25);

        let mut renamed = Establishment::new("e1", "Centre J. Verne", "centre");
        renamed.location = Some("Nantes".to_string());
        assert!(engine.update_establishment(renamed));
        assert_eq!(engine.state().etablissements[0].name, "Centre J. Verne");
        assert!(!engine.update_establishment(Establishment::new("nope", "x", "autre")));

        // Adding the same id replaces instead of duplicating
        engine.add_establishment(Establishment::new("e1", "Centre", "centre"));
        assert_eq!(engine.state().etablissements.len(), 1);

        assert!(engine.remove_establishment("e1"));
        assert!(!engine.remove_establishment("e1"));
        assert!(engine.state().etablissements.is_empty());
        // Unlocks are never revoked
        assert_eq!(unlocked_ids(&engine), vec!["first_etab"]);
    }

    #[test]
    fn test_custom_activity_crud() {
        let mut engine = engine();
        let item = CatalogItem::new("mine", "Perles", "Activités", ActivityType::Centre);
        engine.add_custom_activity(item.clone());

        assert_eq!(unlocked_ids(&engine), vec!["creator"]);
        assert_eq!(engine.activity("mine").unwrap().title, "Perles");

        let mut renamed = item;
        renamed.title = "Perles à repasser".to_string();
        assert!(engine.update_custom_activity(renamed));
        assert_eq!(engine.activity("mine").unwrap().title, "Perles à repasser");

        assert!(engine.remove_custom_activity("mine"));
        assert!(engine.activity("mine").is_none());
    }

    #[test]
    fn test_deleted_custom_activity_stops_counting_for_category() {
        let mut engine = engine();
        engine.add_custom_activity(CatalogItem::new(
            "mine",
            "Puzzle",
            "Jeux",
            ActivityType::Centre,
        ));
        for _ in 0..4 {
            engine.record_usage("mine", None, None);
        }
        engine.remove_custom_activity("mine");
        engine.record_usage("c2", None, None);

        assert!(!unlocked_ids(&engine).contains(&"gamer"));
    }

    #[test]
    fn test_dismiss_notification() {
        let mut engine = engine();
        engine.add_establishment(Establishment::new("e1", "École", "ecole"));
        let id = engine.pending_notifications()[0].id.clone();

        engine.dismiss_notification("unknown");
        assert_eq!(engine.pending_notifications().len(), 1);

        engine.dismiss_notification(&id);
        assert!(engine.pending_notifications().is_empty());
    }

    #[test]
    fn test_reset_progress() {
        let mut engine = engine();
        engine.set_username("Léa");
        engine.record_usage("c1", None, None);
        engine.add_establishment(Establishment::new("e1", "École", "ecole"));

        engine.reset_progress();
        assert_eq!(engine.state(), &EngineState::default());
    }

    #[test]
    fn test_import_json_rejects_without_mutation() {
        let mut engine = engine();
        engine.record_usage("c1", None, None);
        let before = engine.state().clone();

        assert!(engine.import_json("{\"unrelated\": true}").is_err());
        assert!(engine.import_json("garbage").is_err());
        assert_eq!(engine.state(), &before);
    }

    #[test]
    fn test_import_clears_notifications_and_defaults() {
        let mut engine = engine();
        engine.add_establishment(Establishment::new("e1", "École", "ecole"));
        assert!(!engine.pending_notifications().is_empty());

        engine
            .import_json(r#"{"state": {"username": "Tom", "xp": 30}, "version": 2}"#)
            .unwrap();

        assert!(engine.pending_notifications().is_empty());
        assert!(engine.state().etablissements.is_empty());
        assert_eq!(engine.state().username.as_deref(), Some("Tom"));
        assert_eq!(engine.state().xp, 30);
        assert_eq!(engine.state().unlocked_count(), 0);
    }

    #[test]
    fn test_events() {
        let mut engine = engine();
        let mut rx = engine.subscribe();

        engine.award_xp(100);

        assert_eq!(
            rx.try_recv().unwrap(),
            EngineEvent::XpAwarded {
                amount: 100,
                total: 100
            }
        );
        assert!(matches!(
            rx.try_recv().unwrap(),
            EngineEvent::LevelUp(LevelUp {
                old_level: 1,
                new_level: 2,
                ..
            })
        ));
        assert_eq!(rx.try_recv().unwrap(), EngineEvent::StateChanged);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_observer_is_pruned() {
        let mut engine = engine();
        drop(engine.subscribe());
        engine.set_username("x");
        assert!(engine.observers.is_empty());
    }
}
