//! LifeQuest engine
//!
//! Progression, loot, achievements, daily quests, and boss encounters over
//! pluggable persistence and a tiered AI gateway. The UI layer embeds
//! [`App`] and calls its operations directly; there is no wire protocol.

pub mod app;
pub mod infrastructure;
pub mod prompts;
pub mod stores;
pub mod use_cases;

#[cfg(test)]
mod test_support;

pub use app::{build_llm, init_tracing, App, Repos};
