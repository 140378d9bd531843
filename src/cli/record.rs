//! Usage logging and manual XP

use anyhow::{bail, Context, Result};
use chrono::DateTime;

use mcl::config::Config;

use super::session::Session;

/// Log one usage of an activity
pub async fn record_command(
    config: &Config,
    activity_id: &str,
    at: Option<&str>,
    etab: Option<String>,
) -> Result<()> {
    let timestamp = at
        .map(|s| {
            DateTime::parse_from_rfc3339(s)
                .map(|dt| dt.timestamp_millis())
                .with_context(|| format!("Invalid --at timestamp (expected RFC 3339): {}", s))
        })
        .transpose()?;

    let mut session = Session::open(config).await?;
    let engine = session.engine();

    let Some(activity) = engine.activity(activity_id) else {
        bail!(
            "Unknown activity: {}\nUse `mcl activity list` to see available ids.",
            activity_id
        );
    };
    let title = activity.title.clone();

    if let Some(etab_id) = etab.as_deref() {
        if !engine.state().etablissements.iter().any(|e| e.id == etab_id) {
            bail!("Unknown establishment: {}", etab_id);
        }
    }

    let record = session
        .engine_mut()
        .record_usage(activity_id, timestamp, etab);
    let count = session.engine().usage_count_for(&record.activity_id);
    println!("Recorded {} (used {}x)", title, count);

    session.finish().await
}

/// Grant XP directly
pub async fn xp_command(config: &Config, amount: u64) -> Result<()> {
    let mut session = Session::open(config).await?;
    session.engine_mut().award_xp(amount);
    let info = session.engine().level_info();
    println!(
        "Level {} - {} ({} XP to next level)",
        info.level,
        info.title(),
        info.remaining()
    );
    session.finish().await
}
