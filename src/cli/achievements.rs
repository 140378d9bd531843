//! Achievement listing

use anyhow::{bail, Result};
use std::io::IsTerminal;

use mcl::config::Config;
use mcl::progress::{canonical_condition, EvaluationContext, Rarity};

use super::session::Session;

pub async fn achievements_command(config: &Config, rarity: Option<String>) -> Result<()> {
    let rarity = match rarity.as_deref() {
        Some(r) => match Rarity::from_str(r) {
            Some(r) => Some(r),
            None => bail!("Unknown rarity: {} (common, rare, epic, legendary)", r),
        },
        None => None,
    };

    let session = Session::open(config).await?;
    let engine = session.engine();
    let state = engine.state();
    let ctx = EvaluationContext::from_parts(
        &state.activity_history,
        state.etablissements.len(),
        state.custom_activities.len(),
        state.xp,
        &engine.catalog(),
    );

    println!(
        "Achievements: {}/{} unlocked\n",
        state.unlocked_count(),
        state.achievements.len()
    );

    let colored = std::io::stdout().is_terminal();
    for achievement in state
        .achievements
        .iter()
        .filter(|a| rarity.is_none_or(|r| a.rarity == r))
    {
        let status = if achievement.unlocked { "x" } else { " " };
        print!(
            "  [{}] {} {:<24} {} +{} XP",
            status,
            achievement.icon,
            achievement.title,
            paint(
                achievement.rarity.color(),
                &format!("{:<10}", achievement.rarity.label()),
                colored
            ),
            achievement.xp_reward
        );
        if !achievement.unlocked {
            let condition = achievement
                .condition
                .as_ref()
                .or_else(|| canonical_condition(&achievement.id));
            if let Some(condition) = condition {
                let target = condition.target();
                print!("  ({}/{})", ctx.progress(condition).min(target), target);
            }
        }
        println!();
        println!("        {}", achievement.description);
    }

    session.finish().await
}

/// Wrap `text` in a 24-bit ANSI foreground color given as `#rrggbb`
fn paint(hex: &str, text: &str, enabled: bool) -> String {
    let rgb = hex.strip_prefix('#').filter(|h| h.len() == 6 && h.is_ascii()).and_then(|h| {
        let channel = |i: usize| u8::from_str_radix(&h[i..i + 2], 16).ok();
        Some((channel(0)?, channel(2)?, channel(4)?))
    });
    match rgb {
        Some((r, g, b)) if enabled => format!("\x1b[38;2;{r};{g};{b}m{text}\x1b[0m"),
        _ => text.to_string(),
    }
}
