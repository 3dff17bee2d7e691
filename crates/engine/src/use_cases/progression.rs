//! Progression queries: XP totals and level placement.

use std::sync::Arc;

use lifequest_domain::{progression, LevelInfo, UserId};

use crate::infrastructure::ports::{AchievementRepo, RepoError};

/// A user's position on the leveling curve.
#[derive(Debug, Clone, Copy)]
pub struct UserProgress {
    pub total_xp: u64,
    pub level: LevelInfo,
}

pub struct ProgressionOps {
    achievements: Arc<dyn AchievementRepo>,
}

impl ProgressionOps {
    pub fn new(achievements: Arc<dyn AchievementRepo>) -> Self {
        Self { achievements }
    }

    /// Pure curve lookup for a known XP total.
    pub fn level_info(&self, total_xp: u64) -> LevelInfo {
        progression::level_for(total_xp)
    }

    /// Derive a user's XP total from their achievements and place it on the
    /// curve. XP is not stored separately; achievements are the ledger.
    pub async fn progress_for_user(&self, user_id: UserId) -> Result<UserProgress, RepoError> {
        let achievements = self.achievements.list_for_user(user_id).await?;
        let total_xp = progression::total_xp(&achievements);
        Ok(UserProgress {
            total_xp,
            level: progression::level_for(total_xp),
        })
    }
}
