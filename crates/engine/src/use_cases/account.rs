//! Account reset: the only way game state is ever deleted.

use std::sync::Arc;

use lifequest_domain::UserId;

use crate::infrastructure::ports::{
    AchievementRepo, BossRepo, ItemRepo, QuestHistoryRepo, RepoError,
};

pub struct AccountOps {
    achievements: Arc<dyn AchievementRepo>,
    items: Arc<dyn ItemRepo>,
    quest_history: Arc<dyn QuestHistoryRepo>,
    bosses: Arc<dyn BossRepo>,
}

impl AccountOps {
    pub fn new(
        achievements: Arc<dyn AchievementRepo>,
        items: Arc<dyn ItemRepo>,
        quest_history: Arc<dyn QuestHistoryRepo>,
        bosses: Arc<dyn BossRepo>,
    ) -> Self {
        Self {
            achievements,
            items,
            quest_history,
            bosses,
        }
    }

    /// Hard reset: wipe the user's level, items, history, and bosses.
    pub async fn reset(&self, user_id: UserId) -> Result<(), RepoError> {
        self.achievements.delete_all_for_user(user_id).await?;
        self.items.delete_all_for_user(user_id).await?;
        self.quest_history.delete_all_for_user(user_id).await?;
        self.bosses.delete_all_for_user(user_id).await?;
        tracing::info!(%user_id, "account reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::InMemoryStores;
    use chrono::Utc;
    use lifequest_domain::{Achievement, Boss, Item, ItemKind, Rarity};

    #[tokio::test]
    async fn reset_wipes_every_collection_for_the_user_only() {
        let stores = InMemoryStores::new();
        let ops = AccountOps::new(
            stores.achievements.clone(),
            stores.items.clone(),
            stores.quest_history.clone(),
            stores.bosses.clone(),
        );
        let user = UserId::new();
        let bystander = UserId::new();
        let now = Utc::now();

        for owner in [user, bystander] {
            stores
                .achievements
                .save(&Achievement::new(owner, "A", "a", "🏆", 10, now))
                .await
                .expect("save");
            stores
                .items
                .save(&Item::new(
                    owner,
                    "Blade",
                    "Sharp.",
                    "🗡️",
                    Rarity::Common,
                    5,
                    ItemKind::Weapon,
                    now,
                ))
                .await
                .expect("save");
            stores
                .bosses
                .save(&Boss::new(owner, 5, "Boss", "Scary.", 500, 150, now))
                .await
                .expect("save");
        }

        ops.reset(user).await.expect("reset");

        assert!(stores.achievements.list_for_user(user).await.expect("list").is_empty());
        assert!(stores.items.list_for_user(user).await.expect("list").is_empty());
        assert!(stores.bosses.find_for_tier(user, 5).await.expect("find").is_none());

        assert_eq!(stores.achievements.list_for_user(bystander).await.expect("list").len(), 1);
        assert_eq!(stores.items.list_for_user(bystander).await.expect("list").len(), 1);
        assert!(stores.bosses.find_for_tier(bystander, 5).await.expect("find").is_some());
    }
}
