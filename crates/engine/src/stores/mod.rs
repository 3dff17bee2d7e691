//! Repository implementations that ship with the engine.

mod memory;

pub use memory::{
    InMemoryAchievementRepo, InMemoryBossRepo, InMemoryItemRepo, InMemoryQuestHistoryRepo,
    InMemoryStores,
};
