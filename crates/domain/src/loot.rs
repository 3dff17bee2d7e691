//! Loot drop policy
//!
//! Rarity and power bands are decided here, locally, before any generative
//! call is made. The AI only dresses the result up with flavor text, so the
//! drop economy stays under statistical control no matter what the model
//! returns. Randomness is injected as uniform draws in `[0, 1)` rather than
//! sampled here.

use std::ops::RangeInclusive;

use crate::entities::Rarity;

/// Chance that completing a quest drops loot at all.
pub const DROP_CHANCE: f64 = 0.30;

/// Upgrade thresholds. Each draw only happens after the prior upgrade passed.
pub const RARE_THRESHOLD: f64 = 0.70;
pub const EPIC_THRESHOLD: f64 = 0.90;
pub const LEGENDARY_THRESHOLD: f64 = 0.98;

/// Whether a drop-gate draw produces loot.
pub fn drop_succeeds(roll: f64) -> bool {
    roll <= DROP_CHANCE
}

/// Roll a rarity from successive upgrade draws.
///
/// The draws are cumulative upgrades: a COMMON result never consults the
/// EPIC or LEGENDARY thresholds.
pub fn roll_rarity(mut draw: impl FnMut() -> f64) -> Rarity {
    if draw() <= RARE_THRESHOLD {
        return Rarity::Common;
    }
    if draw() <= EPIC_THRESHOLD {
        return Rarity::Rare;
    }
    if draw() <= LEGENDARY_THRESHOLD {
        return Rarity::Epic;
    }
    Rarity::Legendary
}

/// Closed power interval for a rarity band.
pub fn power_range(rarity: Rarity) -> RangeInclusive<i32> {
    match rarity {
        Rarity::Common => 1..=10,
        Rarity::Rare => 20..=40,
        Rarity::Epic => 50..=75,
        Rarity::Legendary => 80..=120,
    }
}

/// Force an externally supplied power value into the band for `rarity`.
pub fn clamp_power(rarity: Rarity, power: i32) -> i32 {
    let range = power_range(rarity);
    power.clamp(*range.start(), *range.end())
}
