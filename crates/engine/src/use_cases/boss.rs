//! Boss encounters: tier-gated spawning and deterministic combat.

use serde::Deserialize;
use std::sync::Arc;

use lifequest_domain::{combat, Boss, BossId, BossStatus, Item, ItemId, UserId};

use crate::infrastructure::gateway::AiGateway;
use crate::infrastructure::ports::{BossRepo, ClockPort, ItemRepo, RandomPort, RepoError};
use crate::prompts;

/// Canned battle logs used when narration fails. The deterministic outcome
/// still applies.
const CANNED_WIN_LOG: &str = "You defeated the boss!";
const CANNED_LOSS_LOG: &str = "You took a hit but survived.";

#[derive(Debug, thiserror::Error)]
pub enum BossError {
    #[error("Boss not found")]
    NotFound,
    #[error("Boss is not alive")]
    NotAlive,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// What one attack did.
#[derive(Debug, Clone)]
pub struct BattleOutcome {
    pub boss_id: BossId,
    pub boss_name: String,
    pub win: bool,
    pub damage_dealt: i32,
    pub remaining_hp: i32,
    pub status: BossStatus,
    pub log: String,
}

// Wire formats
#[derive(Debug, Deserialize)]
struct BossFlavor {
    name: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct BattleNarration {
    log: String,
}

pub struct BossOps {
    bosses: Arc<dyn BossRepo>,
    items: Arc<dyn ItemRepo>,
    gateway: Arc<AiGateway>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl BossOps {
    pub fn new(
        bosses: Arc<dyn BossRepo>,
        items: Arc<dyn ItemRepo>,
        gateway: Arc<AiGateway>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            bosses,
            items,
            gateway,
            random,
            clock,
        }
    }

    /// Spawn check when a user's level changes.
    ///
    /// Bosses appear at levels 5, 10, 15, and so on. Re-entry is idempotent:
    /// an alive boss for the tier is returned as-is, a defeated one stays
    /// buried forever. Generation failure degrades to "no boss this check".
    pub async fn check_spawn(
        &self,
        user_id: UserId,
        level: u32,
    ) -> Result<Option<Boss>, BossError> {
        if !combat::is_boss_tier(level) {
            return Ok(None);
        }

        if let Some(existing) = self.bosses.find_for_tier(user_id, level).await? {
            return Ok(match existing.status {
                BossStatus::Alive => Some(existing),
                BossStatus::Defeated => None,
            });
        }

        let flavor: BossFlavor = match self.gateway.generate(&prompts::spawn_boss(level)).await {
            Ok(flavor) => flavor,
            Err(e) => {
                tracing::warn!(error = %e, level, "boss generation failed, skipping spawn");
                return Ok(None);
            }
        };

        let boss = Boss::new(
            user_id,
            level,
            flavor.name,
            flavor.description,
            combat::boss_hp(level),
            combat::boss_defense(level),
            self.clock.now(),
        );
        self.bosses.save(&boss).await?;

        tracing::info!(boss = %boss.name, level, "boss spawned");
        Ok(Some(boss))
    }

    /// Resolve one attack against a boss.
    ///
    /// The win/loss decision and damage are computed and persisted before the
    /// narration call, so a dead narrator can only cost flavor text.
    pub async fn fight(
        &self,
        user_id: UserId,
        boss_id: BossId,
        item_ids: &[ItemId],
    ) -> Result<BattleOutcome, BossError> {
        let mut boss = self
            .bosses
            .get(user_id, boss_id)
            .await?
            .ok_or(BossError::NotFound)?;
        if !boss.is_alive() {
            return Err(BossError::NotAlive);
        }

        // Unknown or unowned ids contribute nothing
        let mut loadout: Vec<Item> = Vec::with_capacity(item_ids.len());
        for id in item_ids {
            if let Some(item) = self.items.get(user_id, *id).await? {
                loadout.push(item);
            }
        }
        let player_power: i32 = loadout.iter().map(|i| i.power).sum();

        let chance = combat::win_chance(player_power, boss.defense);
        let win = self.random.gen_unit() < chance;
        let resolution = combat::resolve_attack(boss.hp, win);
        boss.apply(&resolution);
        self.bosses.save(&boss).await?;

        let log = match self
            .gateway
            .generate::<BattleNarration>(&prompts::narrate_battle(&boss, &loadout, win))
            .await
        {
            Ok(narration) => narration.log,
            Err(e) => {
                tracing::warn!(error = %e, "battle narration failed, using canned log");
                if win {
                    CANNED_WIN_LOG.to_string()
                } else {
                    CANNED_LOSS_LOG.to_string()
                }
            }
        };

        Ok(BattleOutcome {
            boss_id: boss.id,
            boss_name: boss.name.clone(),
            win,
            damage_dealt: resolution.damage,
            remaining_hp: boss.hp,
            status: boss.status,
            log,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::{FixedClock, SequenceRandom};
    use crate::infrastructure::ports::LlmError;
    use crate::stores::InMemoryStores;
    use crate::test_support::ScriptedLlm;
    use chrono::Utc;
    use lifequest_domain::{ItemKind, Rarity};

    const BOSS_JSON: &str =
        "{\"name\": \"The Specter of Burnout\", \"description\": \"It whispers about deadlines.\"}";

    fn ops_with(
        stores: &InMemoryStores,
        llm: ScriptedLlm,
        random: SequenceRandom,
    ) -> BossOps {
        BossOps::new(
            stores.bosses.clone(),
            stores.items.clone(),
            Arc::new(AiGateway::new(Arc::new(llm))),
            Arc::new(random),
            Arc::new(FixedClock(Utc::now())),
        )
    }

    async fn seed_item(stores: &InMemoryStores, user: UserId, power: i32) -> ItemId {
        let item = Item::new(
            user,
            "Blade",
            "Sharp.",
            "🗡️",
            Rarity::Epic,
            power,
            ItemKind::Weapon,
            Utc::now(),
        );
        stores.items.save(&item).await.expect("save");
        item.id
    }

    #[tokio::test]
    async fn off_tier_levels_never_spawn() {
        let stores = InMemoryStores::new();
        let ops = ops_with(&stores, ScriptedLlm::replies(Vec::<String>::new()), SequenceRandom::units([]));

        for level in [0, 1, 4, 7, 12, 51] {
            assert!(ops.check_spawn(UserId::new(), level).await.expect("check").is_none());
        }
    }

    #[tokio::test]
    async fn tier_spawn_creates_a_boss_with_local_stats() {
        let stores = InMemoryStores::new();
        let ops = ops_with(&stores, ScriptedLlm::replies([BOSS_JSON]), SequenceRandom::units([]));
        let user = UserId::new();

        let boss = ops.check_spawn(user, 5).await.expect("check").expect("boss");

        assert_eq!(boss.name, "The Specter of Burnout");
        assert_eq!(boss.hp, 500);
        assert_eq!(boss.max_hp, 500);
        assert_eq!(boss.defense, 150);
        assert_eq!(boss.status, BossStatus::Alive);
        assert!(stores.bosses.get(user, boss.id).await.expect("get").is_some());
    }

    #[tokio::test]
    async fn alive_boss_is_returned_without_regeneration() {
        let stores = InMemoryStores::new();
        // Only one scripted reply: a second generation attempt would fail
        let ops = ops_with(&stores, ScriptedLlm::replies([BOSS_JSON]), SequenceRandom::units([]));
        let user = UserId::new();

        let first = ops.check_spawn(user, 5).await.expect("check").expect("boss");
        let second = ops.check_spawn(user, 5).await.expect("check").expect("boss");
        assert_eq!(first.id, second.id);
    }

    #[tokio::test]
    async fn defeated_tier_stays_cleared() {
        let stores = InMemoryStores::new();
        let ops = ops_with(&stores, ScriptedLlm::replies([BOSS_JSON]), SequenceRandom::units([0.0]));
        let user = UserId::new();

        let boss = ops.check_spawn(user, 5).await.expect("check").expect("boss");
        let item = seed_item(&stores, user, 200).await;
        let outcome = ops.fight(user, boss.id, &[item]).await.expect("fight");
        assert_eq!(outcome.status, BossStatus::Defeated);

        assert!(ops.check_spawn(user, 5).await.expect("check").is_none());
    }

    #[tokio::test]
    async fn generation_failure_means_no_boss_this_check() {
        let stores = InMemoryStores::new();
        let ops = ops_with(
            &stores,
            ScriptedLlm::new([Err(LlmError::RequestFailed("down".to_string()))]),
            SequenceRandom::units([]),
        );
        let user = UserId::new();

        assert!(ops.check_spawn(user, 5).await.expect("check").is_none());
        assert!(stores.bosses.find_for_tier(user, 5).await.expect("find").is_none());
    }

    #[tokio::test]
    async fn fighting_a_missing_boss_is_an_error() {
        let stores = InMemoryStores::new();
        let ops = ops_with(&stores, ScriptedLlm::replies(Vec::<String>::new()), SequenceRandom::units([]));

        let result = ops.fight(UserId::new(), BossId::new(), &[]).await;
        assert!(matches!(result, Err(BossError::NotFound)));
    }

    #[tokio::test]
    async fn fighting_a_foreign_boss_is_an_error_and_mutates_nothing() {
        let stores = InMemoryStores::new();
        let ops = ops_with(&stores, ScriptedLlm::replies([BOSS_JSON]), SequenceRandom::units([0.0]));
        let owner = UserId::new();
        let stranger = UserId::new();

        let boss = ops.check_spawn(owner, 5).await.expect("check").expect("boss");
        let result = ops.fight(stranger, boss.id, &[]).await;
        assert!(matches!(result, Err(BossError::NotFound)));

        let unchanged = stores.bosses.get(owner, boss.id).await.expect("get").expect("boss");
        assert_eq!(unchanged.hp, 500);
        assert_eq!(unchanged.status, BossStatus::Alive);
    }

    #[tokio::test]
    async fn fighting_a_defeated_boss_is_an_error_and_mutates_nothing() {
        let stores = InMemoryStores::new();
        let ops = ops_with(
            &stores,
            ScriptedLlm::replies([BOSS_JSON]),
            SequenceRandom::units([0.0, 0.0]),
        );
        let user = UserId::new();

        let boss = ops.check_spawn(user, 5).await.expect("check").expect("boss");
        let item = seed_item(&stores, user, 200).await;
        ops.fight(user, boss.id, &[item]).await.expect("fight");

        let result = ops.fight(user, boss.id, &[item]).await;
        assert!(matches!(result, Err(BossError::NotAlive)));

        let buried = stores.bosses.get(user, boss.id).await.expect("get").expect("boss");
        assert_eq!(buried.hp, 0);
    }

    #[tokio::test]
    async fn strong_loadout_defeats_the_boss_outright() {
        let stores = InMemoryStores::new();
        // Narration fails: canned log must appear, outcome must stand
        let ops = ops_with(
            &stores,
            ScriptedLlm::new([
                Ok(BOSS_JSON.to_string()),
                Err(LlmError::RequestFailed("narrator down".to_string())),
            ]),
            SequenceRandom::units([0.94]),
        );
        let user = UserId::new();

        let boss = ops.check_spawn(user, 5).await.expect("check").expect("boss");
        // power 200 vs defense 150: clamp(200/150 - 0.2) = 0.95, draw 0.94 wins
        let item = seed_item(&stores, user, 200).await;
        let outcome = ops.fight(user, boss.id, &[item]).await.expect("fight");

        assert!(outcome.win);
        assert_eq!(outcome.damage_dealt, 500);
        assert_eq!(outcome.remaining_hp, 0);
        assert_eq!(outcome.status, BossStatus::Defeated);
        assert_eq!(outcome.log, CANNED_WIN_LOG);
    }

    #[tokio::test]
    async fn bare_fists_lose_and_chip_ten_percent() {
        let stores = InMemoryStores::new();
        let ops = ops_with(
            &stores,
            ScriptedLlm::new([
                Ok(BOSS_JSON.to_string()),
                Err(LlmError::RequestFailed("narrator down".to_string())),
            ]),
            // power 0: chance clamps to 0.1, draw 0.5 loses
            SequenceRandom::units([0.5]),
        );
        let user = UserId::new();

        let boss = ops.check_spawn(user, 5).await.expect("check").expect("boss");
        let outcome = ops.fight(user, boss.id, &[]).await.expect("fight");

        assert!(!outcome.win);
        assert_eq!(outcome.damage_dealt, 50);
        assert_eq!(outcome.remaining_hp, 450);
        assert_eq!(outcome.status, BossStatus::Alive);
        assert_eq!(outcome.log, CANNED_LOSS_LOG);

        let stored = stores.bosses.get(user, boss.id).await.expect("get").expect("boss");
        assert_eq!(stored.hp, 450);
    }

    #[tokio::test]
    async fn power_double_the_defense_caps_the_win_chance() {
        let stores = InMemoryStores::new();
        let ops = ops_with(
            &stores,
            ScriptedLlm::new([Err(LlmError::RequestFailed("narrator down".to_string()))]),
            // clamp(200/100 - 0.2) = 0.95: a draw just under the ceiling wins
            SequenceRandom::units([0.9499]),
        );
        let user = UserId::new();
        let boss = lifequest_domain::Boss::new(
            user,
            5,
            "The Hydra of Backlog",
            "Two tickets sprout for every one closed.",
            500,
            100,
            Utc::now(),
        );
        stores.bosses.save(&boss).await.expect("save");
        let item = seed_item(&stores, user, 200).await;

        let outcome = ops.fight(user, boss.id, &[item]).await.expect("fight");

        assert!(outcome.win);
        assert_eq!(outcome.remaining_hp, 0);
        assert_eq!(outcome.status, BossStatus::Defeated);
    }

    #[tokio::test]
    async fn unowned_items_contribute_no_power() {
        let stores = InMemoryStores::new();
        let ops = ops_with(
            &stores,
            ScriptedLlm::new([
                Ok(BOSS_JSON.to_string()),
                Err(LlmError::RequestFailed("narrator down".to_string())),
            ]),
            // 0.1 is NOT below the clamped 0.1 floor: bare-power fight loses
            SequenceRandom::units([0.1]),
        );
        let user = UserId::new();
        let stranger_item = seed_item(&stores, UserId::new(), 500).await;

        let boss = ops.check_spawn(user, 5).await.expect("check").expect("boss");
        let outcome = ops
            .fight(user, boss.id, &[stranger_item, ItemId::new()])
            .await
            .expect("fight");

        assert!(!outcome.win);
        assert_eq!(outcome.damage_dealt, 50);
    }

    #[tokio::test]
    async fn narration_reply_is_used_when_available() {
        let stores = InMemoryStores::new();
        let ops = ops_with(
            &stores,
            ScriptedLlm::replies([
                BOSS_JSON,
                "{\"log\": \"Your blade sings; the specter dissolves into overtime dust.\"}",
            ]),
            SequenceRandom::units([0.0]),
        );
        let user = UserId::new();

        let boss = ops.check_spawn(user, 5).await.expect("check").expect("boss");
        let item = seed_item(&stores, user, 400).await;
        let outcome = ops.fight(user, boss.id, &[item]).await.expect("fight");

        assert!(outcome.win);
        assert!(outcome.log.contains("overtime dust"));
    }
}
