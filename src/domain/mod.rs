//! Core domain types for MCL
//!
//! Entities owned by the progress engine: catalogue entries, establishments
//! and the usage log.

mod activity;
mod establishment;
mod usage;

pub use activity::{ActivityType, AttachmentFile, CatalogItem};
pub use establishment::Establishment;
pub use usage::UsageRecord;
