//! CLI command implementations

pub mod achievements;
pub mod activity;
pub mod etab;
pub mod init;
pub mod profile;
pub mod record;
pub mod reset;
pub mod session;
pub mod stats;
pub mod transfer;
