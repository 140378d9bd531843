//! Shared test utilities for profile integration tests
#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

use mcl::engine::ProgressEngine;

/// 2023-11-14T22:13:20Z
pub const T0: i64 = 1_700_000_000_000;

/// Engine on a fresh profile with a frozen clock
pub fn fixed_engine() -> ProgressEngine {
    ProgressEngine::default().with_clock(|| T0)
}

/// Temp dir plus the path of a profile file inside it
pub fn profile_file() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("profile_data.json");
    (temp_dir, path)
}

/// A record saved by the first app release: older achievement list, one
/// since-retired achievement, no establishments
pub fn v1_blob() -> String {
    serde_json::json!({
        "state": {
            "username": "Léa",
            "xp": 300,
            "level": 3,
            "activityHistory": [
                { "id": "u1", "activityId": "c1", "date": T0 },
                { "id": "u2", "activityId": "c2", "date": T0 + 1000 }
            ],
            "achievements": [
                {
                    "id": "explorer",
                    "title": "Explorateur",
                    "unlocked": true,
                    "dateUnlocked": T0
                },
                { "id": "first_steps", "title": "Premiers pas", "unlocked": true },
                { "id": "regular", "title": "Habitué", "unlocked": false }
            ]
        },
        "version": 1
    })
    .to_string()
}
