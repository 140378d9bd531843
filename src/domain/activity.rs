//! Catalogue entries (reference activities and user-authored ones)

use serde::{Deserialize, Serialize};

/// Where an activity is run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    /// Leisure center (mercredis, vacances)
    Centre,
    /// Before/after school care
    Periscolaire,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Centre => "Centre",
            Self::Periscolaire => "Periscolaire",
        }
    }

    /// Case-insensitive parse, accepting the accented spelling too
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "centre" => Some(Self::Centre),
            "periscolaire" | "périscolaire" => Some(Self::Periscolaire),
            _ => None,
        }
    }
}

impl std::fmt::Display for ActivityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File attached to a custom activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentFile {
    pub uri: String,
    pub name: String,
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,
}

/// A catalogue entry
///
/// The progress engine only reads `id` and `category`; everything else is
/// carried for the front end and round-tripped through snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Cover image URI
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<AttachmentFile>>,
    /// Category label, e.g. "Activités", "Coloriage", "Jeux"
    pub category: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    /// Only meaningful for `Centre` activities
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    /// Only meaningful for `Periscolaire` activities ("primaire" / "maternelle")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_class: Option<String>,
}

impl CatalogItem {
    /// Minimal entry with the fields the engine cares about
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        category: impl Into<String>,
        activity_type: ActivityType,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            image: String::new(),
            images: None,
            duration: None,
            location: None,
            prerequis: None,
            attachments: None,
            category: category.into(),
            activity_type,
            age_group: None,
            school_level: None,
            school_class: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_type_parse() {
        assert_eq!(ActivityType::from_str("centre"), Some(ActivityType::Centre));
        assert_eq!(
            ActivityType::from_str("Périscolaire"),
            Some(ActivityType::Periscolaire)
        );
        assert_eq!(ActivityType::from_str("garderie"), None);
    }

    #[test]
    fn test_catalog_item_wire_names() {
        let mut item = CatalogItem::new("x1", "Atelier", "Jeux", ActivityType::Centre);
        item.age_group = Some("5 ans".to_string());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "Centre");
        assert_eq!(json["ageGroup"], "5 ans");
        assert!(json.get("schoolLevel").is_none());
    }
}
