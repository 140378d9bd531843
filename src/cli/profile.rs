//! Profile command: show or edit name and picture

use anyhow::Result;

use mcl::config::Config;

use super::session::Session;

pub async fn profile_command(
    config: &Config,
    name: Option<String>,
    image: Option<String>,
    clear_image: bool,
) -> Result<()> {
    let mut session = Session::open(config).await?;

    if let Some(name) = name {
        let name = name.trim().to_string();
        if name.is_empty() {
            anyhow::bail!("Name cannot be empty");
        }
        session.engine_mut().set_username(name);
    }
    if clear_image {
        session.engine_mut().set_profile_image(None);
    } else if let Some(uri) = image {
        session.engine_mut().set_profile_image(Some(uri));
    }

    let engine = session.engine();
    let state = engine.state();
    let info = engine.level_info();

    if state.is_onboarded() {
        println!("{}", state.username.as_deref().unwrap_or_default());
    } else {
        println!("(no name yet, use --name)");
    }
    if let Some(image) = &state.profile_image {
        println!("  Picture: {}", image);
    }
    println!("  Level {} - {}", info.level, info.title());
    println!(
        "  XP: {} ({}/{} in level, {:.0}%)",
        state.xp,
        info.current_level_xp,
        info.next_level_xp,
        info.progress() * 100.0
    );
    println!("  Usages: {}", state.activity_history.len());
    println!(
        "  Achievements: {}/{}",
        state.unlocked_count(),
        state.achievements.len()
    );

    session.finish().await
}
