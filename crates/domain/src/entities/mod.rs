//! Domain entities

mod achievement;
mod boss;
mod item;
mod quest;

pub use achievement::Achievement;
pub use boss::{Boss, BossStatus};
pub use item::{Item, ItemKind, Rarity};
pub use quest::{Quest, QuestCategory, QuestRecord};
