//! Custom activity CRUD and catalogue listing

use anyhow::{bail, Result};

use mcl::config::Config;
use mcl::domain::{ActivityType, CatalogItem};

use super::session::Session;

/// Optional fields shared by `activity add` and `activity update`
#[derive(Debug, Default)]
pub struct ActivityFields {
    pub title: Option<String>,
    pub category: Option<String>,
    pub activity_type: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
}

fn parse_type(s: &str) -> Result<ActivityType> {
    match ActivityType::from_str(s) {
        Some(t) => Ok(t),
        None => bail!("Unknown activity type: {} (expected centre or periscolaire)", s),
    }
}

impl ActivityFields {
    fn apply(self, item: &mut CatalogItem) -> Result<()> {
        if let Some(title) = self.title {
            item.title = title;
        }
        if let Some(category) = self.category {
            item.category = category;
        }
        if let Some(t) = self.activity_type {
            item.activity_type = parse_type(&t)?;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if self.duration.is_some() {
            item.duration = self.duration;
        }
        if self.location.is_some() {
            item.location = self.location;
        }
        Ok(())
    }
}

pub async fn activity_add_command(
    config: &Config,
    id: Option<String>,
    fields: ActivityFields,
) -> Result<()> {
    let Some(title) = fields.title.clone() else {
        bail!("--title is required");
    };
    let Some(category) = fields.category.clone() else {
        bail!("--category is required");
    };
    let activity_type = match fields.activity_type.as_deref() {
        Some(t) => parse_type(t)?,
        None => ActivityType::Centre,
    };

    let id = id.unwrap_or_else(|| format!("custom-{}", uuid::Uuid::new_v4()));
    let mut item = CatalogItem::new(id, title, category, activity_type);
    fields.apply(&mut item)?;

    let mut session = Session::open(config).await?;
    println!("Added activity {} ({})", item.title, item.id);
    session.engine_mut().add_custom_activity(item);
    session.finish().await
}

pub async fn activity_update_command(
    config: &Config,
    id: &str,
    fields: ActivityFields,
) -> Result<()> {
    let mut session = Session::open(config).await?;
    let Some(existing) = session
        .engine()
        .state()
        .custom_activities
        .iter()
        .find(|i| i.id == id)
    else {
        bail!("Custom activity not found: {}", id);
    };

    let mut updated = existing.clone();
    fields.apply(&mut updated)?;
    session.engine_mut().update_custom_activity(updated);
    println!("Updated activity {}", id);
    session.finish().await
}

pub async fn activity_remove_command(config: &Config, id: &str) -> Result<()> {
    let mut session = Session::open(config).await?;
    if !session.engine_mut().remove_custom_activity(id) {
        bail!("Custom activity not found: {}", id);
    }
    println!("Removed activity {} (its history is kept)", id);
    session.finish().await
}

pub async fn activity_list_command(
    config: &Config,
    category: Option<String>,
    activity_type: Option<String>,
    json: bool,
) -> Result<()> {
    let session = Session::open(config).await?;
    let engine = session.engine();
    let catalog = engine.catalog();

    let mut items = match category.as_deref() {
        Some(category) => catalog.by_category(category),
        None => catalog.all(),
    };
    if let Some(t) = activity_type.as_deref() {
        let t = parse_type(t)?;
        items.retain(|i| i.activity_type == t);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No activities match.");
    } else {
        let custom = &engine.state().custom_activities;
        for item in items {
            let marker = if custom.iter().any(|c| c.id == item.id) { "*" } else { " " };
            println!(
                " {}{:<12} {:<28} {:<10} {:<13} used {}x",
                marker,
                item.id,
                item.title,
                item.category,
                item.activity_type,
                engine.usage_count_for(&item.id)
            );
        }
    }
    session.finish().await
}
