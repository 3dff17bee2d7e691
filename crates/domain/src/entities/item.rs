//! Item entity - loot dropped by completed quests
//!
//! Items are created by the loot roller on a successful drop and are
//! immutable afterwards. Rarity and power are decided locally before any
//! generative call; the AI only supplies flavor (name, description, emoji,
//! kind).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DomainError;
use crate::ids::{ItemId, UserId};

/// A piece of loot owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    pub emoji: String,
    pub rarity: Rarity,
    /// Combat strength. Always inside the band for `rarity`.
    pub power: i32,
    pub kind: ItemKind,
    pub date_found: DateTime<Utc>,
}

impl Item {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        name: impl Into<String>,
        description: impl Into<String>,
        emoji: impl Into<String>,
        rarity: Rarity,
        power: i32,
        kind: ItemKind,
        found: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ItemId::new(),
            user_id,
            name: name.into(),
            description: description.into(),
            emoji: emoji.into(),
            rarity,
            power,
            kind,
            date_found: found,
        }
    }
}

/// Ordinal loot quality band. Ordering matters: `Common < Rare < Epic < Legendary`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Common => write!(f, "COMMON"),
            Self::Rare => write!(f, "RARE"),
            Self::Epic => write!(f, "EPIC"),
            Self::Legendary => write!(f, "LEGENDARY"),
        }
    }
}

impl FromStr for Rarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMMON" => Ok(Self::Common),
            "RARE" => Ok(Self::Rare),
            "EPIC" => Ok(Self::Epic),
            "LEGENDARY" => Ok(Self::Legendary),
            other => Err(DomainError::parse(format!("unknown rarity: {other}"))),
        }
    }
}

/// What slot a piece of loot occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    Relic,
    /// Unknown kind for forward compatibility
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weapon => write!(f, "WEAPON"),
            Self::Armor => write!(f, "ARMOR"),
            Self::Potion => write!(f, "POTION"),
            Self::Relic => write!(f, "RELIC"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl FromStr for ItemKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WEAPON" => Ok(Self::Weapon),
            "ARMOR" => Ok(Self::Armor),
            "POTION" => Ok(Self::Potion),
            "RELIC" => Ok(Self::Relic),
            _ => Ok(Self::Unknown),
        }
    }
}
