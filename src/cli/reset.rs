//! Reset command

use anyhow::{bail, Result};

use mcl::config::Config;

use super::session::Session;

pub async fn reset_command(config: &Config, yes: bool) -> Result<()> {
    if !yes {
        bail!("This erases the whole profile (XP, history, achievements).\nRe-run with --yes to confirm.");
    }

    let mut session = Session::open(config).await?;
    session.engine_mut().reset_progress();
    println!("Profile reset.");
    session.finish().await
}
