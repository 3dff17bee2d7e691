//! In-memory repositories.
//!
//! Default persistence for tests and embedding hosts that have not wired a
//! real database. Rows are keyed by (user, id) so user scoping is enforced
//! by construction.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use lifequest_domain::{
    Achievement, AchievementId, Boss, BossId, Item, ItemId, QuestRecord, UserId,
};

use crate::infrastructure::ports::{
    AchievementRepo, BossRepo, ItemRepo, QuestHistoryRepo, RepoError,
};

#[derive(Default)]
pub struct InMemoryAchievementRepo {
    rows: RwLock<HashMap<(UserId, AchievementId), Achievement>>,
}

#[async_trait]
impl AchievementRepo for InMemoryAchievementRepo {
    async fn get(
        &self,
        user_id: UserId,
        id: AchievementId,
    ) -> Result<Option<Achievement>, RepoError> {
        Ok(self.rows.read().await.get(&(user_id, id)).cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Achievement>, RepoError> {
        let rows = self.rows.read().await;
        let mut achievements: Vec<Achievement> = rows
            .values()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        achievements.sort_by_key(|a| a.last_earned);
        Ok(achievements)
    }

    async fn save(&self, achievement: &Achievement) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .insert((achievement.user_id, achievement.id), achievement.clone());
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<(), RepoError> {
        self.rows.write().await.retain(|(owner, _), _| *owner != user_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryItemRepo {
    rows: RwLock<HashMap<(UserId, ItemId), Item>>,
}

#[async_trait]
impl ItemRepo for InMemoryItemRepo {
    async fn get(&self, user_id: UserId, id: ItemId) -> Result<Option<Item>, RepoError> {
        Ok(self.rows.read().await.get(&(user_id, id)).cloned())
    }

    async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Item>, RepoError> {
        let rows = self.rows.read().await;
        let mut items: Vec<Item> = rows
            .values()
            .filter(|i| i.user_id == user_id)
            .cloned()
            .collect();
        items.sort_by_key(|i| std::cmp::Reverse(i.date_found));
        Ok(items)
    }

    async fn save(&self, item: &Item) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .insert((item.user_id, item.id), item.clone());
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<(), RepoError> {
        self.rows.write().await.retain(|(owner, _), _| *owner != user_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryQuestHistoryRepo {
    rows: RwLock<Vec<QuestRecord>>,
}

#[async_trait]
impl QuestHistoryRepo for InMemoryQuestHistoryRepo {
    async fn recent(&self, user_id: UserId, limit: usize) -> Result<Vec<QuestRecord>, RepoError> {
        let rows = self.rows.read().await;
        let mut records: Vec<QuestRecord> = rows
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by_key(|r| std::cmp::Reverse(r.generated_at));
        records.truncate(limit);
        Ok(records)
    }

    async fn append(&self, records: &[QuestRecord]) -> Result<(), RepoError> {
        self.rows.write().await.extend_from_slice(records);
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<(), RepoError> {
        self.rows.write().await.retain(|r| r.user_id != user_id);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryBossRepo {
    rows: RwLock<HashMap<(UserId, BossId), Boss>>,
}

#[async_trait]
impl BossRepo for InMemoryBossRepo {
    async fn get(&self, user_id: UserId, id: BossId) -> Result<Option<Boss>, RepoError> {
        Ok(self.rows.read().await.get(&(user_id, id)).cloned())
    }

    async fn find_for_tier(&self, user_id: UserId, level: u32) -> Result<Option<Boss>, RepoError> {
        let rows = self.rows.read().await;
        Ok(rows
            .values()
            .find(|b| b.user_id == user_id && b.level == level)
            .cloned())
    }

    async fn save(&self, boss: &Boss) -> Result<(), RepoError> {
        self.rows
            .write()
            .await
            .insert((boss.user_id, boss.id), boss.clone());
        Ok(())
    }

    async fn delete_all_for_user(&self, user_id: UserId) -> Result<(), RepoError> {
        self.rows.write().await.retain(|(owner, _), _| *owner != user_id);
        Ok(())
    }
}

/// The four collections bundled together, ready to hand to [`crate::app::App`].
pub struct InMemoryStores {
    pub achievements: Arc<InMemoryAchievementRepo>,
    pub items: Arc<InMemoryItemRepo>,
    pub quest_history: Arc<InMemoryQuestHistoryRepo>,
    pub bosses: Arc<InMemoryBossRepo>,
}

impl InMemoryStores {
    pub fn new() -> Self {
        Self {
            achievements: Arc::new(InMemoryAchievementRepo::default()),
            items: Arc::new(InMemoryItemRepo::default()),
            quest_history: Arc::new(InMemoryQuestHistoryRepo::default()),
            bosses: Arc::new(InMemoryBossRepo::default()),
        }
    }
}

impl Default for InMemoryStores {
    fn default() -> Self {
        Self::new()
    }
}
