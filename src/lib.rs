//! MCL - Mon Centre de Loisirs
//!
//! Progress tracking for leisure-center and after-school activities. Every
//! logged usage earns XP, XP drives an exponential level curve, and a fixed
//! catalogue of achievements unlocks as the history grows.
//!
//! ## Layout
//!
//! - [`progress`]: pure rules (level curve, achievement catalogue, evaluator,
//!   schema migration, streaks)
//! - [`engine`]: the stateful [`engine::ProgressEngine`] applying mutations
//! - [`storage`]: key-value transports plus the versioned snapshot loader
//! - [`catalog`], [`domain`]: activities, establishments, usage records
//! - [`stats`]: read-only usage statistics
//! - [`config`]: `~/.mcl/config.toml`

pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod progress;
pub mod stats;
pub mod storage;

pub use domain::*;
