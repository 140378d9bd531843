//! Gamification rules: XP curve, achievement catalog, unlock checks and
//! catalog migration.
//!
//! Everything in here is pure. The engine owns the state and decides when
//! to call into these rules.

mod checker;
mod definitions;
mod levels;
mod migration;
mod streaks;

pub use checker::{evaluate, EvaluationContext};
pub use definitions::{
    canonical_achievements, canonical_condition, Achievement, Condition, Rarity,
    ACHIEVEMENTS_VERSION,
};
pub use levels::{level_from_xp, level_title, xp_required_for_level, LevelInfo, XpRewards};
pub use migration::{merge, needs_migration};
pub use streaks::{active_days, daily_streak, day_of};
