//! Achievement matching: classify free-text logs via the gateway and apply
//! the fixed-XP persistence rule.

use serde::Deserialize;
use std::sync::Arc;

use lifequest_domain::{Achievement, AchievementId, UserId};

use crate::infrastructure::gateway::AiGateway;
use crate::infrastructure::ports::{AchievementRepo, ClockPort, LlmError, RepoError};
use crate::prompts;

#[derive(Debug, thiserror::Error)]
pub enum AchievementError {
    #[error("Classification failed: {0}")]
    Classification(#[from] LlmError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Result of classifying one log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The log matches an existing achievement.
    Match { id: AchievementId },
    /// The log deserves a brand new achievement.
    New {
        title: String,
        description: String,
        emoji: String,
        xp: u32,
    },
}

/// What `process_log` did to the achievement set.
#[derive(Debug, Clone)]
pub struct LogOutcome {
    pub achievement: Achievement,
    pub newly_created: bool,
}

// Wire format returned by the classification prompt
#[derive(Debug, Deserialize)]
struct RawClassification {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    id: Option<String>,
    #[serde(rename = "newAchievement", default)]
    new_achievement: Option<RawNewAchievement>,
}

#[derive(Debug, Deserialize)]
struct RawNewAchievement {
    title: String,
    description: String,
    #[serde(default)]
    emoji: String,
    #[serde(default)]
    xp: Option<u32>,
}

pub struct AchievementOps {
    achievements: Arc<dyn AchievementRepo>,
    gateway: Arc<AiGateway>,
    clock: Arc<dyn ClockPort>,
}

impl AchievementOps {
    pub fn new(
        achievements: Arc<dyn AchievementRepo>,
        gateway: Arc<AiGateway>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            achievements,
            gateway,
            clock,
        }
    }

    /// Ask the gateway to classify a log entry against the existing set.
    ///
    /// The reply is schema-validated before anything trusts it: a MATCH must
    /// name an id that is actually in `existing`, and a NEW xp is normalised
    /// to a multiple of 10 inside [10, 50] (difficulty 1-5 times 10).
    pub async fn classify(
        &self,
        log_text: &str,
        existing: &[Achievement],
    ) -> Result<Classification, LlmError> {
        let prompt = prompts::classify_log(log_text, existing);
        let raw: RawClassification = self.gateway.generate(&prompt).await?;

        match raw.kind.as_str() {
            "MATCH" => {
                let id = raw.id.ok_or_else(|| {
                    LlmError::InvalidResponse("MATCH without an id".to_string())
                })?;
                let matched = existing
                    .iter()
                    .find(|a| a.id.to_string() == id)
                    .ok_or_else(|| {
                        LlmError::InvalidResponse(format!(
                            "matched id {id} is not in the achievement list"
                        ))
                    })?;
                Ok(Classification::Match { id: matched.id })
            }
            "NEW" => {
                let new = raw.new_achievement.ok_or_else(|| {
                    LlmError::InvalidResponse("NEW without an achievement body".to_string())
                })?;
                Ok(Classification::New {
                    title: new.title,
                    description: new.description,
                    emoji: new.emoji,
                    xp: normalize_xp(new.xp.unwrap_or(10)),
                })
            }
            other => Err(LlmError::InvalidResponse(format!(
                "unknown classification type: {other}"
            ))),
        }
    }

    /// Classify a log entry and persist the result.
    ///
    /// On a match the stored XP is left untouched; only the earn count and
    /// timestamp change. On AI failure nothing changes and the caller gets an
    /// explicit error to surface as "nothing happened, try again".
    pub async fn process_log(
        &self,
        user_id: UserId,
        log_text: &str,
    ) -> Result<LogOutcome, AchievementError> {
        let existing = self.achievements.list_for_user(user_id).await?;

        match self.classify(log_text, &existing).await? {
            Classification::Match { id } => {
                let mut achievement = self
                    .achievements
                    .get(user_id, id)
                    .await?
                    .ok_or(RepoError::NotFound)?;
                achievement.record_match(self.clock.now());
                self.achievements.save(&achievement).await?;
                Ok(LogOutcome {
                    achievement,
                    newly_created: false,
                })
            }
            Classification::New {
                title,
                description,
                emoji,
                xp,
            } => {
                let achievement =
                    Achievement::new(user_id, title, description, emoji, xp, self.clock.now());
                self.achievements.save(&achievement).await?;
                Ok(LogOutcome {
                    achievement,
                    newly_created: true,
                })
            }
        }
    }
}

/// Clamp a model-supplied XP value onto the difficulty grid.
fn normalize_xp(xp: u32) -> u32 {
    (xp.clamp(10, 50) / 10) * 10
}
