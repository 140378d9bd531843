//! Usage statistics derived from a profile
//!
//! Everything here is read-only and recomputed on demand from the usage
//! history; nothing is persisted.

mod models;
mod summary;

pub use models::{ActivityCount, CategoryCount, EstablishmentCount, StatsSummary};

/// How many activities the "most used" ranking keeps
pub const TOP_ACTIVITIES: usize = 5;
/// How many establishments the "most visited" ranking keeps
pub const TOP_ETABLISSEMENTS: usize = 3;
/// How many usages the recent list keeps
pub const RECENT_USAGES: usize = 15;
