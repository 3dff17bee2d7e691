//! Daily quest generation with anti-repetition history.

use serde::Deserialize;
use std::sync::Arc;

use lifequest_domain::{Quest, QuestCategory, QuestRecord, UserId};

use crate::infrastructure::gateway::AiGateway;
use crate::infrastructure::ports::{ClockPort, LlmError, QuestHistoryRepo, RepoError};
use crate::prompts;

/// How many recent history entries feed the anti-repetition context.
const HISTORY_CONTEXT_LIMIT: usize = 30;

/// XP bounds stated in the generation prompt, enforced locally.
const MIN_QUEST_XP: u32 = 10;
const MAX_QUEST_XP: u32 = 50;

#[derive(Debug, thiserror::Error)]
pub enum QuestError {
    #[error("Quest generation failed: {0}")]
    Generation(#[from] LlmError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

// Wire format returned by the daily quest prompt
#[derive(Debug, Deserialize)]
struct RawQuestBatch {
    quests: Vec<RawQuest>,
}

#[derive(Debug, Deserialize)]
struct RawQuest {
    title: String,
    task: String,
    #[serde(default)]
    xp: Option<u32>,
    #[serde(rename = "type", default)]
    category: QuestCategory,
}

pub struct QuestOps {
    history: Arc<dyn QuestHistoryRepo>,
    gateway: Arc<AiGateway>,
    clock: Arc<dyn ClockPort>,
}

impl QuestOps {
    pub fn new(
        history: Arc<dyn QuestHistoryRepo>,
        gateway: Arc<AiGateway>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            history,
            gateway,
            clock,
        }
    }

    /// Generate the day's quest batch.
    ///
    /// Recent history rides along in the prompt so the model stops suggesting
    /// the same stretches every morning. The fresh batch is recorded to
    /// history before being returned; on AI failure nothing is written.
    pub async fn generate_daily(&self, user_id: UserId) -> Result<Vec<Quest>, QuestError> {
        let recent = self.history.recent(user_id, HISTORY_CONTEXT_LIMIT).await?;

        let prompt = prompts::daily_quests(&recent);
        let batch: RawQuestBatch = self.gateway.generate(&prompt).await?;

        if batch.quests.is_empty() {
            return Err(QuestError::Generation(LlmError::InvalidResponse(
                "empty quest batch".to_string(),
            )));
        }

        let quests: Vec<Quest> = batch
            .quests
            .into_iter()
            .map(|q| {
                Quest::new(
                    q.title,
                    q.task,
                    q.xp.unwrap_or(MIN_QUEST_XP).clamp(MIN_QUEST_XP, MAX_QUEST_XP),
                    q.category,
                )
            })
            .collect();

        let now = self.clock.now();
        let records: Vec<QuestRecord> = quests
            .iter()
            .map(|q| QuestRecord {
                user_id,
                title: q.title.clone(),
                task: q.task.clone(),
                category: q.category,
                generated_at: now,
            })
            .collect();
        self.history.append(&records).await?;

        Ok(quests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::stores::InMemoryStores;
    use crate::test_support::ScriptedLlm;
    use chrono::Utc;

    fn ops_with(stores: &InMemoryStores, llm: ScriptedLlm) -> QuestOps {
        QuestOps::new(
            stores.quest_history.clone(),
            Arc::new(AiGateway::new(Arc::new(llm))),
            Arc::new(FixedClock(Utc::now())),
        )
    }

    const BATCH_JSON: &str = "{\"quests\": [\
        {\"title\": \"Potion of Clarity\", \"task\": \"Drink water\", \"xp\": 10, \"type\": \"HEALTH\"},\
        {\"title\": \"Git Offering\", \"task\": \"Commit once\", \"xp\": 25, \"type\": \"CODE\"},\
        {\"title\": \"Bard Training\", \"task\": \"Listen to an album\", \"xp\": 500, \"type\": \"CHORES\"}\
    ]}";

    #[tokio::test]
    async fn batch_is_returned_and_recorded() {
        let stores = InMemoryStores::new();
        let ops = ops_with(&stores, ScriptedLlm::replies([BATCH_JSON]));
        let user = UserId::new();

        let quests = ops.generate_daily(user).await.expect("batch");

        assert_eq!(quests.len(), 3);
        assert!(quests.iter().all(|q| !q.completed));
        assert_eq!(quests[0].category, QuestCategory::Health);
        // Out-of-range XP is clamped, unknown categories preserved as Unknown
        assert_eq!(quests[2].xp, MAX_QUEST_XP);
        assert_eq!(quests[2].category, QuestCategory::Unknown);

        let history = stores.quest_history.recent(user, 10).await.expect("recent");
        assert_eq!(history.len(), 3);
    }

    #[tokio::test]
    async fn generation_failure_writes_no_history() {
        let stores = InMemoryStores::new();
        let ops = ops_with(
            &stores,
            ScriptedLlm::new([Err(LlmError::RequestFailed("down".to_string()))]),
        );
        let user = UserId::new();

        let result = ops.generate_daily(user).await;
        assert!(matches!(result, Err(QuestError::Generation(_))));
        assert!(stores.quest_history.recent(user, 10).await.expect("recent").is_empty());
    }

    #[tokio::test]
    async fn empty_batch_is_rejected() {
        let stores = InMemoryStores::new();
        let ops = ops_with(&stores, ScriptedLlm::replies(["{\"quests\": []}"]));

        let result = ops.generate_daily(UserId::new()).await;
        assert!(matches!(result, Err(QuestError::Generation(_))));
    }
}
