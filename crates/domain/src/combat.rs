//! Boss combat resolution
//!
//! The win/loss decision is a deterministic formula over summed item power
//! and boss defense plus one locally drawn uniform. The AI narrates the
//! outcome afterwards and is never allowed to override it: a generative
//! model deciding pass/fail directly would make outcomes unreproducible and
//! open to prompt-stuffing.

use serde::{Deserialize, Serialize};

/// Floor of the win chance, reached at zero power.
pub const MIN_WIN_CHANCE: f64 = 0.1;
/// Ceiling of the win chance, however strong the loadout.
pub const MAX_WIN_CHANCE: f64 = 0.95;

/// Fraction of current HP chipped off by a losing attack.
const LOSS_DAMAGE_DIVISOR: i32 = 10;

/// The resolved effect of one attack, before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResolution {
    pub win: bool,
    pub damage: i32,
    pub remaining_hp: i32,
    pub defeated: bool,
}

/// Whether a level sits on a boss tier. Tiers are positive multiples of 5.
pub fn is_boss_tier(level: u32) -> bool {
    level > 0 && level % 5 == 0
}

/// Boss HP for a tier.
pub fn boss_hp(level: u32) -> i32 {
    level as i32 * 100
}

/// Boss defense for a tier.
pub fn boss_defense(level: u32) -> i32 {
    level as i32 * 30
}

/// Win chance for an attack: `clamp(power / max(defense, 1) - 0.2, 0.1, 0.95)`.
pub fn win_chance(player_power: i32, defense: i32) -> f64 {
    let ratio = f64::from(player_power) / f64::from(defense.max(1));
    (ratio - 0.2).clamp(MIN_WIN_CHANCE, MAX_WIN_CHANCE)
}

/// Resolve one attack against a boss at `current_hp`.
///
/// A win deals the boss's full remaining HP. A loss chips off 10% of current
/// HP, rounded down; status only flips when HP actually reaches zero.
pub fn resolve_attack(current_hp: i32, win: bool) -> BattleResolution {
    if win {
        return BattleResolution {
            win: true,
            damage: current_hp,
            remaining_hp: 0,
            defeated: true,
        };
    }

    let damage = current_hp.max(0) / LOSS_DAMAGE_DIVISOR;
    let remaining_hp = current_hp - damage;
    BattleResolution {
        win: false,
        damage,
        remaining_hp,
        defeated: remaining_hp <= 0,
    }
}
