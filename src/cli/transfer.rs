//! Export and import of profile snapshots

use anyhow::{Context, Result};
use std::path::Path;

use mcl::config::Config;
use mcl::engine::export_state;

use super::session::Session;

/// Write the profile as a pretty JSON envelope
pub async fn export_command(config: &Config, file: &Path) -> Result<()> {
    let session = Session::open(config).await?;
    let content = export_state(session.engine().state()).context("Failed to serialize profile")?;

    if let Some(parent) = file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(file, content)
        .with_context(|| format!("Failed to write export file: {}", file.display()))?;

    println!("Exported profile to {}", file.display());
    session.finish().await
}

/// Replace the profile with the content of an export file
pub async fn import_command(config: &Config, file: &Path) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read import file: {}", file.display()))?;

    let mut session = Session::open(config).await?;
    session
        .engine_mut()
        .import_json(&content)
        .with_context(|| format!("Invalid profile file: {}", file.display()))?;

    let state = session.engine().state();
    println!(
        "Imported {}: level {}, {} XP, {} usages",
        state.username.as_deref().unwrap_or("profile"),
        state.level,
        state.xp,
        state.activity_history.len()
    );
    session.finish().await
}
