//! Application state and composition.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::infrastructure::clock::{SystemClock, SystemRandom};
use crate::infrastructure::gateway::AiGateway;
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::ollama::OllamaClient;
use crate::infrastructure::ports::{
    AchievementRepo, BossRepo, ClockPort, ItemRepo, LlmPort, QuestHistoryRepo, RandomPort,
};
use crate::infrastructure::settings::AppSettings;
use crate::infrastructure::tiered_llm::{LlmTier, TieredLlmClient};
use crate::stores::InMemoryStores;
use crate::use_cases::{
    AccountOps, AchievementOps, BossOps, LootOps, ProgressionOps, QuestOps,
};

/// Container for the four persistence ports.
pub struct Repos {
    pub achievements: Arc<dyn AchievementRepo>,
    pub items: Arc<dyn ItemRepo>,
    pub quest_history: Arc<dyn QuestHistoryRepo>,
    pub bosses: Arc<dyn BossRepo>,
}

impl Repos {
    /// In-memory persistence, for tests and hosts without a database.
    pub fn in_memory() -> Self {
        let stores = InMemoryStores::new();
        Self {
            achievements: stores.achievements,
            items: stores.items,
            quest_history: stores.quest_history,
            bosses: stores.bosses,
        }
    }
}

/// Main application state.
///
/// Holds the use-case operations the UI layer calls. There is no wire
/// protocol; hosts embed this struct and call the ops directly.
pub struct App {
    pub progression: ProgressionOps,
    pub loot: LootOps,
    pub achievements: AchievementOps,
    pub quests: QuestOps,
    pub boss: BossOps,
    pub account: AccountOps,
}

impl App {
    pub fn new(
        repos: Repos,
        llm: Arc<dyn LlmPort>,
        clock: Arc<dyn ClockPort>,
        random: Arc<dyn RandomPort>,
    ) -> Self {
        let gateway = Arc::new(AiGateway::new(llm));

        Self {
            progression: ProgressionOps::new(repos.achievements.clone()),
            loot: LootOps::new(
                repos.items.clone(),
                gateway.clone(),
                random.clone(),
                clock.clone(),
            ),
            achievements: AchievementOps::new(
                repos.achievements.clone(),
                gateway.clone(),
                clock.clone(),
            ),
            quests: QuestOps::new(repos.quest_history.clone(), gateway.clone(), clock.clone()),
            boss: BossOps::new(
                repos.bosses.clone(),
                repos.items.clone(),
                gateway,
                random,
                clock,
            ),
            account: AccountOps::new(
                repos.achievements,
                repos.items,
                repos.quest_history,
                repos.bosses,
            ),
        }
    }

    /// Compose the app from environment settings with in-memory persistence.
    pub fn from_settings(settings: &AppSettings) -> Self {
        Self::new(
            Repos::in_memory(),
            build_llm(settings),
            Arc::new(SystemClock),
            Arc::new(SystemRandom),
        )
    }
}

/// Build the provider chain from settings: Gemini first when a key is
/// present, local Ollama as the always-available fallback.
pub fn build_llm(settings: &AppSettings) -> Arc<dyn LlmPort> {
    let mut tiers = Vec::new();

    if let Some(api_key) = &settings.gemini_api_key {
        tiers.push(LlmTier::with_breaker(
            Arc::new(GeminiClient::new(api_key, &settings.gemini_model)),
            settings.breaker_config(),
        ));
    } else {
        tracing::info!("no Gemini API key configured, running on the local tier only");
    }

    tiers.push(LlmTier::with_breaker(
        Arc::new(OllamaClient::new(
            &settings.ollama_base_url,
            &settings.ollama_model,
        )),
        settings.breaker_config(),
    ));

    Arc::new(TieredLlmClient::new(tiers))
}

/// Initialize logging for a host process.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lifequest_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
