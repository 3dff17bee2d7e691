//! Use cases: the operations the UI layer calls.

pub mod account;
pub mod achievements;
pub mod boss;
pub mod loot;
pub mod progression;
pub mod quests;

pub use account::AccountOps;
pub use achievements::{AchievementError, AchievementOps, Classification, LogOutcome};
pub use boss::{BattleOutcome, BossError, BossOps};
pub use loot::LootOps;
pub use progression::{ProgressionOps, UserProgress};
pub use quests::{QuestError, QuestOps};
