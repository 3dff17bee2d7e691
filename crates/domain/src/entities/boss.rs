//! Boss entity - a level-tier obstacle with a terminal state machine
//!
//! Per (user, tier) the lifecycle is NONE -> ALIVE -> DEFEATED. DEFEATED is
//! terminal: a cleared tier never spawns another boss for that user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::combat::BattleResolution;
use crate::ids::{BossId, UserId};

/// A boss blocking progression at a level tier (multiple of 5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: BossId,
    pub user_id: UserId,
    pub name: String,
    pub description: String,
    /// The level tier this boss guards. Always a positive multiple of 5.
    pub level: u32,
    pub hp: i32,
    pub max_hp: i32,
    pub defense: i32,
    pub status: BossStatus,
    pub created_at: DateTime<Utc>,
}

impl Boss {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        level: u32,
        name: impl Into<String>,
        description: impl Into<String>,
        hp: i32,
        defense: i32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: BossId::new(),
            user_id,
            name: name.into(),
            description: description.into(),
            level,
            hp,
            max_hp: hp,
            defense,
            status: BossStatus::Alive,
            created_at: now,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.status == BossStatus::Alive
    }

    /// Apply a resolved attack: reduce HP and flip status when defeated.
    pub fn apply(&mut self, resolution: &BattleResolution) {
        self.hp = resolution.remaining_hp;
        if resolution.defeated {
            self.hp = 0;
            self.status = BossStatus::Defeated;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BossStatus {
    Alive,
    Defeated,
}

impl std::fmt::Display for BossStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Alive => write!(f, "ALIVE"),
            Self::Defeated => write!(f, "DEFEATED"),
        }
    }
}

impl FromStr for BossStatus {
    type Err = crate::error::DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALIVE" => Ok(Self::Alive),
            "DEFEATED" => Ok(Self::Defeated),
            other => Err(crate::error::DomainError::parse(format!(
                "unknown boss status: {other}"
            ))),
        }
    }
}
