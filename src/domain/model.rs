use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed classification of where a character comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Group {
    Anime,
    Games,
    #[default]
    Cartoons,
}

impl Group {
    pub const ALL: [Group; 3] = [Group::Anime, Group::Games, Group::Cartoons];

    pub fn as_str(&self) -> &'static str {
        match self {
            Group::Anime => "Anime",
            Group::Games => "Games",
            Group::Cartoons => "Cartoons",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Group::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown group '{}', expected Anime, Games or Cartoons", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatKind {
    Strength,
    Agility,
    Intelligence,
    WebSlinging,
    Combat,
}

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Strength,
        StatKind::Agility,
        StatKind::Intelligence,
        StatKind::WebSlinging,
        StatKind::Combat,
    ];

    /// Field name used in exports.
    pub fn field_name(&self) -> &'static str {
        match self {
            StatKind::Strength => "strength",
            StatKind::Agility => "agility",
            StatKind::Intelligence => "intelligence",
            StatKind::WebSlinging => "webSlinging",
            StatKind::Combat => "combat",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Strength => "Strength",
            StatKind::Agility => "Agility",
            StatKind::Intelligence => "Intelligence",
            StatKind::WebSlinging => "Web Slinging",
            StatKind::Combat => "Combat",
        }
    }
}

/// The five attributes always travel together; a record either has all of
/// them or none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub strength: u8,
    pub agility: u8,
    pub intelligence: u8,
    pub web_slinging: u8,
    pub combat: u8,
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> u8 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Agility => self.agility,
            StatKind::Intelligence => self.intelligence,
            StatKind::WebSlinging => self.web_slinging,
            StatKind::Combat => self.combat,
        }
    }

    pub fn total(&self) -> u32 {
        StatKind::ALL.iter().map(|k| u32::from(self.get(*k))).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// 1-based position in the batch it was extracted with.
    pub index: u32,
    /// Universe label such as `Earth-1610`, not the hero's name.
    pub display_name: String,
    pub hero_name: String,
    pub image_url: String,
    pub group: Group,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Stats>,
}

/// One extraction's worth of records. A new scrape replaces the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterBatch {
    pub characters: Vec<Character>,
    pub last_updated: DateTime<Utc>,
}

impl CharacterBatch {
    pub fn new(characters: Vec<Character>) -> Self {
        Self {
            characters,
            last_updated: Utc::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

/// Result of a scrape attempt. Failures are values, not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScrapeOutcome {
    Success {
        success: Tag<true>,
        characters: Vec<Character>,
    },
    Failure {
        success: Tag<false>,
        error: String,
    },
}

impl ScrapeOutcome {
    pub fn success(characters: Vec<Character>) -> Self {
        Self::Success {
            success: Tag,
            characters,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            success: Tag,
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn into_result(self) -> Result<Vec<Character>, String> {
        match self {
            Self::Success { characters, .. } => Ok(characters),
            Self::Failure { error, .. } => Err(error),
        }
    }
}

/// Boolean literal that only (de)serializes as `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tag<const B: bool>;

impl<const B: bool> Serialize for Tag<B> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(B)
    }
}

impl<'de, const B: bool> Deserialize<'de> for Tag<B> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = bool::deserialize(deserializer)?;
        if value == B {
            Ok(Tag)
        } else {
            Err(serde::de::Error::custom(format!("expected success = {}", B)))
        }
    }
}
