//! Achievement definitions and metadata
//!
//! All achievements are defined here with their unlock conditions and rewards.
//! The list is versioned: bump [`ACHIEVEMENTS_VERSION`] whenever the shape of
//! stored achievements changes so saved profiles get merged on load.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Schema version of the persisted achievement list
///
/// v1: `{id, title, description, unlocked, dateUnlocked}`
/// v2: adds `icon`, `rarity`, `xpReward` and `condition`
pub const ACHIEVEMENTS_VERSION: u32 = 2;

/// Rarity tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "common" => Some(Self::Common),
            "rare" => Some(Self::Rare),
            "epic" => Some(Self::Epic),
            "legendary" => Some(Self::Legendary),
            _ => None,
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Commun",
            Self::Rare => "Rare",
            Self::Epic => "Épique",
            Self::Legendary => "Légendaire",
        }
    }

    /// Badge color (hex)
    pub fn color(&self) -> &'static str {
        match self {
            Self::Common => "#8e8e93",
            Self::Rare => "#0a7ea4",
            Self::Epic => "#9c27b0",
            Self::Legendary => "#ff9800",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unlock condition, compared against aggregates of the engine state
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Total recorded usages
    UsageCount { target: u64 },
    /// Distinct activities used
    UniqueActivities { target: u64 },
    /// Distinct establishments referenced by usages
    UniqueEtabs { target: u64 },
    /// Usages of activities in a category
    CategoryCount { target: u64, category: String },
    /// Establishments registered
    EtabCount { target: u64 },
    /// Custom activities created
    CustomActivities { target: u64 },
    /// Current level
    Level { target: u64 },
}

impl Condition {
    pub fn target(&self) -> u64 {
        match self {
            Self::UsageCount { target }
            | Self::UniqueActivities { target }
            | Self::UniqueEtabs { target }
            | Self::CategoryCount { target, .. }
            | Self::EtabCount { target }
            | Self::CustomActivities { target }
            | Self::Level { target } => *target,
        }
    }
}

/// Achievement definition plus the user's unlock state
///
/// `date_unlocked` is set if and only if `unlocked` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub xp_reward: u64,
    #[serde(default)]
    pub unlocked: bool,
    /// Epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_unlocked: Option<i64>,
    /// Missing on records written before v2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
}

impl Achievement {
    /// Locked definition
    pub fn new(
        id: &str,
        title: &str,
        description: &str,
        icon: &str,
        rarity: Rarity,
        xp_reward: u64,
        condition: Condition,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            rarity,
            xp_reward,
            unlocked: false,
            date_unlocked: None,
            condition: Some(condition),
        }
    }

    /// Mark as unlocked at `now`; no-op when already unlocked
    pub fn unlock(&mut self, now: i64) -> bool {
        if self.unlocked {
            return false;
        }
        self.unlocked = true;
        self.date_unlocked = Some(now);
        true
    }
}

/// The canonical catalog, all locked, in display order
pub fn canonical_achievements() -> &'static [Achievement] {
    &ACHIEVEMENTS
}

/// Condition of a canonical achievement
pub fn canonical_condition(id: &str) -> Option<&'static Condition> {
    ACHIEVEMENTS
        .iter()
        .find(|a| a.id == id)
        .and_then(|a| a.condition.as_ref())
}

static ACHIEVEMENTS: Lazy<Vec<Achievement>> = Lazy::new(|| {
    use Condition::*;
    use Rarity::*;

    vec![
        // === USAGE ===
        Achievement::new(
            "regular",
            "Habitué",
            "Enregistrer 5 utilisations.",
            "repeat",
            Common,
            50,
            UsageCount { target: 5 },
        ),
        Achievement::new(
            "assidu",
            "Assidu",
            "Enregistrer 25 utilisations.",
            "event-available",
            Rare,
            150,
            UsageCount { target: 25 },
        ),
        Achievement::new(
            "marathon",
            "Marathonien",
            "Enregistrer 100 utilisations.",
            "directions-run",
            Epic,
            300,
            UsageCount { target: 100 },
        ),
        Achievement::new(
            "pillar",
            "Pilier du centre",
            "Enregistrer 500 utilisations.",
            "account-balance",
            Legendary,
            1000,
            UsageCount { target: 500 },
        ),
        // === DIVERSITY ===
        Achievement::new(
            "explorer",
            "Explorateur",
            "Essayer 3 activités différentes.",
            "explore",
            Common,
            75,
            UniqueActivities { target: 3 },
        ),
        Achievement::new(
            "curious",
            "Touche-à-tout",
            "Essayer 10 activités différentes.",
            "travel-explore",
            Rare,
            150,
            UniqueActivities { target: 10 },
        ),
        Achievement::new(
            "nomad",
            "Nomade",
            "Utiliser des activités dans 3 établissements différents.",
            "map",
            Rare,
            100,
            UniqueEtabs { target: 3 },
        ),
        // === CATEGORIES ===
        Achievement::new(
            "artist",
            "Artiste en herbe",
            "Enregistrer 5 coloriages.",
            "palette",
            Rare,
            100,
            CategoryCount {
                target: 5,
                category: "Coloriage".to_string(),
            },
        ),
        Achievement::new(
            "gamer",
            "Joueur",
            "Enregistrer 5 jeux.",
            "sports-esports",
            Rare,
            100,
            CategoryCount {
                target: 5,
                category: "Jeux".to_string(),
            },
        ),
        Achievement::new(
            "animator",
            "Animateur",
            "Enregistrer 5 activités manuelles.",
            "brush",
            Rare,
            100,
            CategoryCount {
                target: 5,
                category: "Activités".to_string(),
            },
        ),
        // === ESTABLISHMENTS ===
        Achievement::new(
            "first_etab",
            "Premier établissement",
            "Ajouter un établissement.",
            "home",
            Common,
            25,
            EtabCount { target: 1 },
        ),
        Achievement::new(
            "network",
            "Réseau",
            "Ajouter 5 établissements.",
            "hub",
            Rare,
            100,
            EtabCount { target: 5 },
        ),
        // === CREATION ===
        Achievement::new(
            "creator",
            "Créateur",
            "Créer une activité personnalisée.",
            "add-circle",
            Common,
            50,
            CustomActivities { target: 1 },
        ),
        Achievement::new(
            "architect",
            "Architecte",
            "Créer 5 activités personnalisées.",
            "architecture",
            Epic,
            200,
            CustomActivities { target: 5 },
        ),
        // === LEVELS ===
        Achievement::new(
            "level_5",
            "Niveau 5",
            "Atteindre le niveau 5.",
            "star",
            Rare,
            100,
            Level { target: 5 },
        ),
        Achievement::new(
            "level_10",
            "Niveau 10",
            "Atteindre le niveau 10.",
            "star-half",
            Epic,
            250,
            Level { target: 10 },
        ),
        Achievement::new(
            "level_20",
            "Niveau 20",
            "Atteindre le niveau 20.",
            "military-tech",
            Legendary,
            500,
            Level { target: 20 },
        ),
    ]
});
