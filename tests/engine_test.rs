//! End-to-end progression scenarios driven through the public engine API

mod common;

use common::{fixed_engine, T0};
use mcl::domain::{ActivityType, CatalogItem, Establishment};
use mcl::engine::{EngineEvent, ProgressEngine};
use mcl::progress::{xp_required_for_level, LevelInfo};

fn unlocked_ids(engine: &ProgressEngine) -> Vec<String> {
    engine
        .state()
        .achievements
        .iter()
        .filter(|a| a.unlocked)
        .map(|a| a.id.clone())
        .collect()
}

#[test]
fn test_first_three_activities_unlock_explorer() {
    let mut engine = fixed_engine();
    for id in ["c1", "c2", "c3"] {
        engine.record_usage(id, None, None);
    }

    assert_eq!(unlocked_ids(&engine), vec!["explorer".to_string()]);
    assert_eq!(engine.state().xp, 150);
    assert_eq!(engine.state().level, 2);
    assert_eq!(engine.pending_notifications().len(), 1);

    let notification = &engine.pending_notifications()[0];
    assert_eq!(notification.id, format!("explorer_{}", T0));

    let explorer = engine
        .state()
        .achievements
        .iter()
        .find(|a| a.id == "explorer")
        .unwrap();
    assert_eq!(explorer.date_unlocked, Some(T0));
}

#[test]
fn test_every_usage_adds_one_record_and_xp() {
    let mut engine = fixed_engine();
    let mut last_xp = 0;
    for i in 0..12 {
        engine.record_usage("p2", Some(T0 + i), None);
        assert_eq!(engine.state().activity_history.len() as i64, i + 1);
        assert!(engine.state().xp >= last_xp + 25);
        last_xp = engine.state().xp;
    }
    assert!(unlocked_ids(&engine).contains(&"regular".to_string()));
}

#[test]
fn test_level_boundaries() {
    let mut engine = fixed_engine();
    engine.award_xp(xp_required_for_level(1));

    let info = engine.level_info();
    assert_eq!(info.level, 2);
    assert_eq!(info.current_level_xp, 0);
    assert_eq!(info.next_level_xp, 115);
    assert_eq!(info, LevelInfo::for_xp(100));
}

#[test]
fn test_checks_are_idempotent() {
    let mut engine = fixed_engine();
    for id in ["c1", "c2", "c3"] {
        engine.record_usage(id, None, None);
    }
    let before = engine.state().clone();

    assert!(engine.check_achievements().is_empty());
    assert!(engine.check_achievements().is_empty());
    assert_eq!(engine.state(), &before);
}

#[test]
fn test_establishments_and_custom_activities_unlock() {
    let mut engine = fixed_engine();
    engine.add_establishment(Establishment::new("e1", "Les Tilleuls", "Centre"));
    assert!(unlocked_ids(&engine).contains(&"first_etab".to_string()));

    engine.add_custom_activity(CatalogItem::new(
        "custom-1",
        "Cerf-volant",
        "Activités",
        ActivityType::Centre,
    ));
    assert!(unlocked_ids(&engine).contains(&"creator".to_string()));

    // Unlocks survive removal
    assert!(engine.remove_establishment("e1"));
    assert!(engine.remove_custom_activity("custom-1"));
    let ids = unlocked_ids(&engine);
    assert!(ids.contains(&"first_etab".to_string()));
    assert!(ids.contains(&"creator".to_string()));
}

#[test]
fn test_custom_activity_counts_towards_its_category() {
    let mut engine = fixed_engine();
    engine.add_custom_activity(CatalogItem::new(
        "custom-jeu",
        "Loup-garou",
        "Jeux",
        ActivityType::Periscolaire,
    ));
    for i in 0..5 {
        engine.record_usage("custom-jeu", Some(T0 + i), None);
    }
    assert!(unlocked_ids(&engine).contains(&"gamer".to_string()));
}

#[test]
fn test_dismiss_and_reset() {
    let mut engine = fixed_engine();
    engine.add_establishment(Establishment::new("e1", "Les Tilleuls", "Centre"));
    assert_eq!(engine.pending_notifications().len(), 1);

    engine.dismiss_notification("nope");
    assert_eq!(engine.pending_notifications().len(), 1);

    let id = engine.pending_notifications()[0].id.clone();
    engine.dismiss_notification(&id);
    assert!(engine.pending_notifications().is_empty());

    engine.reset_progress();
    assert_eq!(engine.state().xp, 0);
    assert_eq!(engine.state().level, 1);
    assert!(engine.state().etablissements.is_empty());
    assert!(unlocked_ids(&engine).is_empty());
}

#[test]
fn test_export_then_import_into_fresh_engine() {
    let mut engine = fixed_engine();
    engine.set_username("Inès");
    engine.add_establishment(Establishment::new("e1", "Les Tilleuls", "Centre"));
    for id in ["c1", "c2", "c3", "p1"] {
        engine.record_usage(id, None, Some("e1".into()));
    }

    let exported = mcl::engine::export_state(engine.state()).unwrap();
    let mut other = fixed_engine();
    other.import_json(&exported).unwrap();

    assert_eq!(other.state().username.as_deref(), Some("Inès"));
    assert_eq!(other.state().xp, engine.state().xp);
    assert_eq!(other.state().activity_history, engine.state().activity_history);
    assert_eq!(other.state().achievements, engine.state().achievements);
    assert!(other.pending_notifications().is_empty());
}

#[test]
fn test_import_without_establishments_key() {
    let mut engine = fixed_engine();
    engine.add_establishment(Establishment::new("e1", "Les Tilleuls", "Centre"));

    engine
        .import_json(r#"{"username": "Noé", "xp": 20}"#)
        .unwrap();
    assert!(engine.state().etablissements.is_empty());
    assert_eq!(engine.state().xp, 20);
}

#[test]
fn test_malformed_import_leaves_state_untouched() {
    let mut engine = fixed_engine();
    engine.record_usage("c1", None, None);
    let before = engine.state().clone();

    assert!(engine.import_json("{ not json").is_err());
    assert!(engine.import_json(r#"{"xp": "lots"}"#).is_err());
    assert!(engine.import_json(r#"{"unrelated": true}"#).is_err());
    assert_eq!(engine.state(), &before);
}

#[tokio::test]
async fn test_observers_see_level_up_and_unlock() {
    let mut engine = fixed_engine();
    let mut rx = engine.subscribe();

    engine.award_xp(499);

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::LevelUp(up) if up.new_level == 5)));
    assert!(events
        .iter()
        .any(|e| matches!(e, EngineEvent::AchievementUnlocked(a) if a.id == "level_5")));
    assert_eq!(events.last(), Some(&EngineEvent::StateChanged));
}
