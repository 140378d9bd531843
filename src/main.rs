use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mcl::config::Config;

mod cli;

use cli::activity::ActivityFields;

#[derive(Parser)]
#[command(name = "mcl")]
#[command(about = "Mon Centre de Loisirs - track activities, earn XP and unlock achievements")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.mcl/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a default configuration file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Show the profile, optionally editing it
    Profile {
        /// Set the display name
        #[arg(long)]
        name: Option<String>,

        /// Set the profile picture URI
        #[arg(long, conflicts_with = "clear_image")]
        image: Option<String>,

        /// Remove the profile picture
        #[arg(long)]
        clear_image: bool,
    },

    /// Log one usage of an activity (+25 XP)
    Record {
        /// Activity id (see `mcl activity list`)
        activity: String,

        /// When it happened, RFC 3339 (defaults to now)
        #[arg(long)]
        at: Option<String>,

        /// Establishment id
        #[arg(long)]
        etab: Option<String>,
    },

    /// Grant XP directly
    Xp {
        amount: u64,
    },

    /// Manage establishments
    Etab {
        #[command(subcommand)]
        command: EtabCommands,
    },

    /// Manage custom activities and browse the catalogue
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },

    /// List achievements and progress towards them
    Achievements {
        /// Only show one rarity (common, rare, epic, legendary)
        #[arg(long)]
        rarity: Option<String>,
    },

    /// Show usage statistics
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the profile to a JSON file
    Export {
        file: PathBuf,
    },

    /// Replace the profile with an exported JSON file
    Import {
        file: PathBuf,
    },

    /// Erase the profile
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum EtabCommands {
    /// Add an establishment
    Add {
        name: String,

        /// Identifier (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Kind, e.g. Centre or Ecole
        #[arg(long, default_value = "Centre")]
        kind: String,

        #[arg(long)]
        location: Option<String>,
    },

    /// Edit an establishment
    Update {
        id: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        kind: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Remove an establishment
    Remove {
        id: String,
    },

    /// List establishments
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ActivityCommands {
    /// Add a custom activity
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        category: String,

        /// Identifier (generated when omitted)
        #[arg(long)]
        id: Option<String>,

        /// centre or periscolaire
        #[arg(long = "type", default_value = "centre")]
        activity_type: String,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Edit a custom activity
    Update {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long = "type")]
        activity_type: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        duration: Option<String>,

        #[arg(long)]
        location: Option<String>,
    },

    /// Remove a custom activity
    Remove {
        id: String,
    },

    /// List the reference and custom catalogue
    List {
        #[arg(long)]
        category: Option<String>,

        /// centre or periscolaire
        #[arg(long = "type")]
        activity_type: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let Cli {
        config: config_path,
        verbose,
        command,
    } = cli;

    // Every command but `init` runs against the loaded config, whose level
    // also drives logging
    let load_config = || -> Result<Config> {
        let config = Config::load_from(config_path.as_deref())?;
        init_logging(verbose, &config.log_level);
        Ok(config)
    };

    match command {
        Commands::Init { force } => {
            init_logging(verbose, "info");
            let path = config_path
                .clone()
                .unwrap_or_else(Config::global_config_path);
            cli::init::init_command(&path, force)?;
        }
        Commands::Profile {
            name,
            image,
            clear_image,
        } => {
            cli::profile::profile_command(&load_config()?, name, image, clear_image).await?;
        }
        Commands::Record { activity, at, etab } => {
            cli::record::record_command(&load_config()?, &activity, at.as_deref(), etab).await?;
        }
        Commands::Xp { amount } => {
            cli::record::xp_command(&load_config()?, amount).await?;
        }
        Commands::Etab { command } => match command {
            EtabCommands::Add {
                name,
                id,
                kind,
                location,
            } => {
                cli::etab::etab_add_command(&load_config()?, id, name, kind, location).await?;
            }
            EtabCommands::Update {
                id,
                name,
                kind,
                location,
            } => {
                cli::etab::etab_update_command(&load_config()?, &id, name, kind, location).await?;
            }
            EtabCommands::Remove { id } => {
                cli::etab::etab_remove_command(&load_config()?, &id).await?;
            }
            EtabCommands::List { json } => {
                cli::etab::etab_list_command(&load_config()?, json).await?;
            }
        },
        Commands::Activity { command } => match command {
            ActivityCommands::Add {
                title,
                category,
                id,
                activity_type,
                description,
                duration,
                location,
            } => {
                let fields = ActivityFields {
                    title: Some(title),
                    category: Some(category),
                    activity_type: Some(activity_type),
                    description,
                    duration,
                    location,
                };
                cli::activity::activity_add_command(&load_config()?, id, fields).await?;
            }
            ActivityCommands::Update {
                id,
                title,
                category,
                activity_type,
                description,
                duration,
                location,
            } => {
                let fields = ActivityFields {
                    title,
                    category,
                    activity_type,
                    description,
                    duration,
                    location,
                };
                cli::activity::activity_update_command(&load_config()?, &id, fields).await?;
            }
            ActivityCommands::Remove { id } => {
                cli::activity::activity_remove_command(&load_config()?, &id).await?;
            }
            ActivityCommands::List {
                category,
                activity_type,
                json,
            } => {
                cli::activity::activity_list_command(&load_config()?, category, activity_type, json)
                    .await?;
            }
        },
        Commands::Achievements { rarity } => {
            cli::achievements::achievements_command(&load_config()?, rarity).await?;
        }
        Commands::Stats { json } => {
            cli::stats::stats_command(&load_config()?, json).await?;
        }
        Commands::Export { file } => {
            cli::transfer::export_command(&load_config()?, &file).await?;
        }
        Commands::Import { file } => {
            cli::transfer::import_command(&load_config()?, &file).await?;
        }
        Commands::Reset { yes } => {
            cli::reset::reset_command(&load_config()?, yes).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool, default_level: &str) {
    let log_level = if verbose { "debug" } else { default_level };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}
