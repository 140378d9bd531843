//! Init command implementation

use anyhow::{bail, Result};
use std::path::Path;

use mcl::config::Config;

/// Write a default config file
pub fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    config.save_to_file(config_path)?;
    println!("Created: {}", config_path.display());
    println!(
        "Profile will be stored in {} ({})",
        config.storage.resolved_path().display(),
        config.storage.backend
    );

    Ok(())
}
