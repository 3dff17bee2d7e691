//! Quest entity - ephemeral daily unit of gamified work
//!
//! Quests live for a single day and are never persisted as gameplay state.
//! A [`QuestRecord`] copy goes to quest history so future generations can
//! avoid repeating recent tasks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ids::{QuestId, UserId};

/// A single daily quest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    /// RPG-style title, e.g. "Potion of Clarity".
    pub title: String,
    /// The real-world task behind the title.
    pub task: String,
    pub xp: u32,
    pub completed: bool,
    pub category: QuestCategory,
}

impl Quest {
    pub fn new(
        title: impl Into<String>,
        task: impl Into<String>,
        xp: u32,
        category: QuestCategory,
    ) -> Self {
        Self {
            id: QuestId::new(),
            title: title.into(),
            task: task.into(),
            xp,
            completed: false,
            category,
        }
    }

    /// Flip completion state. Users can un-complete a quest they misclicked.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// History copy of a generated quest, kept for anti-repetition context only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestRecord {
    pub user_id: UserId,
    pub title: String,
    pub task: String,
    pub category: QuestCategory,
    pub generated_at: DateTime<Utc>,
}

/// Quest category. Open enumeration: categories have drifted across
/// revisions of the generator prompt, so unknown values are preserved as
/// [`QuestCategory::Unknown`] rather than rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestCategory {
    Health,
    Code,
    Life,
    Work,
    Social,
    /// Unknown category for forward compatibility
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for QuestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Health => write!(f, "HEALTH"),
            Self::Code => write!(f, "CODE"),
            Self::Life => write!(f, "LIFE"),
            Self::Work => write!(f, "WORK"),
            Self::Social => write!(f, "SOCIAL"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

impl FromStr for QuestCategory {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HEALTH" => Ok(Self::Health),
            "CODE" => Ok(Self::Code),
            "LIFE" => Ok(Self::Life),
            "WORK" => Ok(Self::Work),
            "SOCIAL" => Ok(Self::Social),
            _ => Ok(Self::Unknown),
        }
    }
}
