//! Loot rolling: local drop policy, AI-generated flavor.
//!
//! The whole operation fails soft. A dead provider, a garbage reply, or a
//! failed write all degrade to "no loot this time" rather than an error the
//! UI has to handle.

use serde::Deserialize;
use std::sync::Arc;

use lifequest_domain::{loot, Item, ItemKind, UserId};

use crate::infrastructure::gateway::AiGateway;
use crate::infrastructure::ports::{ClockPort, ItemRepo, RandomPort};
use crate::prompts;

/// Flavor fields requested from the gateway. Power is optional; models skip
/// fields often enough that the band roll has a local fallback.
#[derive(Debug, Deserialize)]
struct ForgedItem {
    name: String,
    description: String,
    #[serde(default)]
    emoji: String,
    #[serde(rename = "type")]
    kind: ItemKind,
    #[serde(default)]
    power: Option<i32>,
}

pub struct LootOps {
    items: Arc<dyn ItemRepo>,
    gateway: Arc<AiGateway>,
    random: Arc<dyn RandomPort>,
    clock: Arc<dyn ClockPort>,
}

impl LootOps {
    pub fn new(
        items: Arc<dyn ItemRepo>,
        gateway: Arc<AiGateway>,
        random: Arc<dyn RandomPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            items,
            gateway,
            random,
            clock,
        }
    }

    /// Roll for loot after a completed quest.
    ///
    /// Drop chance and rarity are decided before the gateway is consulted;
    /// the reply can only dress the item up, never promote it.
    pub async fn roll_loot(&self, user_id: UserId, quest_title: &str) -> Option<Item> {
        if !loot::drop_succeeds(self.random.gen_unit()) {
            return None;
        }

        let rarity = loot::roll_rarity(|| self.random.gen_unit());
        let range = loot::power_range(rarity);

        let prompt = prompts::forge_item(quest_title, rarity, &range);
        let forged: ForgedItem = match self.gateway.generate(&prompt).await {
            Ok(forged) => forged,
            Err(e) => {
                tracing::warn!(error = %e, %rarity, "loot generation failed, no drop");
                return None;
            }
        };

        let power = match forged.power {
            Some(power) => loot::clamp_power(rarity, power),
            None => self.random.gen_range(*range.start(), *range.end()),
        };

        let item = Item::new(
            user_id,
            forged.name,
            forged.description,
            forged.emoji,
            rarity,
            power,
            forged.kind,
            self.clock.now(),
        );

        if let Err(e) = self.items.save(&item).await {
            tracing::warn!(error = %e, "failed to persist loot drop");
            return None;
        }

        Some(item)
    }
}
