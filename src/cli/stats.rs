//! Statistics command

use anyhow::Result;
use chrono::{DateTime, Utc};

use mcl::config::Config;

use super::session::Session;

pub async fn stats_command(config: &Config, json: bool) -> Result<()> {
    let session = Session::open(config).await?;
    let engine = session.engine();
    let summary = engine.stats(Utc::now().date_naive());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return session.finish().await;
    }

    println!("Usages:          {}", summary.total_usages);
    println!("Activities:      {}", summary.unique_activities);
    println!("Active days:     {}", summary.active_days);
    println!("Current streak:  {} day(s)", summary.current_streak);
    println!(
        "Achievements:    {}/{} ({:.0}%)",
        summary.unlocked_achievements,
        summary.total_achievements,
        summary.completion_rate()
    );

    if !summary.top_activities.is_empty() {
        println!("\nMost used activities:");
        for entry in &summary.top_activities {
            println!("  {:>4}x  {}", entry.count, entry.title);
        }
    }

    if !summary.categories.is_empty() {
        println!("\nBy category:");
        for entry in &summary.categories {
            println!("  {:>4}x  {}", entry.count, entry.category);
        }
    }

    if !summary.top_etablissements.is_empty() {
        println!("\nMost visited establishments:");
        for entry in &summary.top_etablissements {
            println!("  {:>4}x  {}", entry.count, entry.name);
        }
    }

    if !summary.recent.is_empty() {
        println!("\nRecent:");
        for usage in &summary.recent {
            let when = DateTime::from_timestamp_millis(usage.date)
                .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "?".to_string());
            let title = engine
                .activity(&usage.activity_id)
                .map(|a| a.title.as_str())
                .unwrap_or("(deleted activity)");
            println!("  {}  {}", when, title);
        }
    }

    session.finish().await
}
