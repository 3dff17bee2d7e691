//! LifeQuest domain layer
//!
//! Pure types and game math: entities, typed IDs, the leveling curve, the
//! loot drop policy, and combat resolution. No I/O, no async, no RNG; the
//! engine crate injects time and randomness through its ports.

pub mod combat;
pub mod entities;
pub mod error;
pub mod ids;
pub mod loot;
pub mod progression;

pub use entities::{
    Achievement, Boss, BossStatus, Item, ItemKind, Quest, QuestCategory, QuestRecord, Rarity,
};

pub use error::DomainError;

pub use combat::BattleResolution;
pub use progression::LevelInfo;

pub use ids::{AchievementId, BossId, ItemId, QuestId, UserId};
