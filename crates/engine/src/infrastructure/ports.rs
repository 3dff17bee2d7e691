//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is
//! concrete types. Ports exist for:
//! - Persistence (the host decides where rows live)
//! - LLM calls (could swap Gemini/Ollama -> anything prompt-in, text-out)
//! - Clock/Random (for testing)

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use lifequest_domain::{
    Achievement, AchievementId, Boss, BossId, Item, ItemId, QuestRecord, UserId,
};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("Not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    RequestFailed(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("No LLM provider configured: {0}")]
    NotConfigured(String),
}

// =============================================================================
// Persistence Ports (one per collection, all user-scoped)
// =============================================================================

#[async_trait]
pub trait AchievementRepo: Send + Sync {
    async fn get(
        &self,
        user_id: UserId,
        id: AchievementId,
    ) -> Result<Option<Achievement>, RepoError>;
    /// All achievements for a user, oldest earn first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Achievement>, RepoError>;
    async fn save(&self, achievement: &Achievement) -> Result<(), RepoError>;
    async fn delete_all_for_user(&self, user_id: UserId) -> Result<(), RepoError>;
}

#[async_trait]
pub trait ItemRepo: Send + Sync {
    async fn get(&self, user_id: UserId, id: ItemId) -> Result<Option<Item>, RepoError>;
    /// All items for a user, newest find first.
    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Item>, RepoError>;
    async fn save(&self, item: &Item) -> Result<(), RepoError>;
    async fn delete_all_for_user(&self, user_id: UserId) -> Result<(), RepoError>;
}

#[async_trait]
pub trait QuestHistoryRepo: Send + Sync {
    /// Most recent history entries for a user, newest first.
    async fn recent(&self, user_id: UserId, limit: usize) -> Result<Vec<QuestRecord>, RepoError>;
    async fn append(&self, records: &[QuestRecord]) -> Result<(), RepoError>;
    async fn delete_all_for_user(&self, user_id: UserId) -> Result<(), RepoError>;
}

#[async_trait]
pub trait BossRepo: Send + Sync {
    async fn get(&self, user_id: UserId, id: BossId) -> Result<Option<Boss>, RepoError>;
    /// The boss for a (user, tier), alive or defeated. At most one ever exists.
    async fn find_for_tier(&self, user_id: UserId, level: u32) -> Result<Option<Boss>, RepoError>;
    async fn save(&self, boss: &Boss) -> Result<(), RepoError>;
    async fn delete_all_for_user(&self, user_id: UserId) -> Result<(), RepoError>;
}

// =============================================================================
// LLM Port
// =============================================================================

/// A single generation request. One prompt in, one reply out.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub prompt: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

impl LlmRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub content: String,
}

#[async_trait]
pub trait LlmPort: Send + Sync {
    /// Short provider name for tier logging ("gemini", "ollama", ...).
    fn provider_name(&self) -> &str;

    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError>;
}

// =============================================================================
// Testability Ports
// =============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait ClockPort: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

pub trait RandomPort: Send + Sync {
    /// A uniform draw in `[0, 1)`.
    fn gen_unit(&self) -> f64;
    /// A uniform integer in `[min, max]`.
    fn gen_range(&self, min: i32, max: i32) -> i32;
}
