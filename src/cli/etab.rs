//! Establishment CRUD commands

use anyhow::{bail, Result};

use mcl::config::Config;
use mcl::domain::Establishment;

use super::session::Session;

pub async fn etab_add_command(
    config: &Config,
    id: Option<String>,
    name: String,
    kind: String,
    location: Option<String>,
) -> Result<()> {
    let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let mut etablissement = Establishment::new(id, name, kind);
    etablissement.location = location;

    let mut session = Session::open(config).await?;
    println!("Added establishment {} ({})", etablissement.name, etablissement.id);
    session.engine_mut().add_establishment(etablissement);
    session.finish().await
}

pub async fn etab_update_command(
    config: &Config,
    id: &str,
    name: Option<String>,
    kind: Option<String>,
    location: Option<String>,
) -> Result<()> {
    let mut session = Session::open(config).await?;
    let Some(existing) = session
        .engine()
        .state()
        .etablissements
        .iter()
        .find(|e| e.id == id)
    else {
        bail!("Establishment not found: {}", id);
    };

    let mut updated = existing.clone();
    if let Some(name) = name {
        updated.name = name;
    }
    if let Some(kind) = kind {
        updated.kind = kind;
    }
    if location.is_some() {
        updated.location = location;
    }

    session.engine_mut().update_establishment(updated);
    println!("Updated establishment {}", id);
    session.finish().await
}

pub async fn etab_remove_command(config: &Config, id: &str) -> Result<()> {
    let mut session = Session::open(config).await?;
    if !session.engine_mut().remove_establishment(id) {
        bail!("Establishment not found: {}", id);
    }
    println!("Removed establishment {}", id);
    session.finish().await
}

pub async fn etab_list_command(config: &Config, json: bool) -> Result<()> {
    let session = Session::open(config).await?;
    let etablissements = &session.engine().state().etablissements;

    if json {
        println!("{}", serde_json::to_string_pretty(etablissements)?);
    } else if etablissements.is_empty() {
        println!("No establishments yet.");
    } else {
        for etab in etablissements {
            print!("  {}  {} [{}]", etab.id, etab.name, etab.kind);
            if let Some(location) = &etab.location {
                print!(" - {}", location);
            }
            println!();
        }
    }
    session.finish().await
}
