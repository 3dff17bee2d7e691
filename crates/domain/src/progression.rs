//! Leveling curve
//!
//! The single progression currency is XP. The cost of leaving level L is
//! `floor(100 * 1.5^(L-1))`, so level 1 -> 2 costs 100, level 2 -> 3 costs
//! 150, and so on. The calculator is pure and total: any non-negative XP
//! amount maps to exactly one (level, progress, requirement) triple.

use crate::entities::Achievement;
use serde::{Deserialize, Serialize};

/// Where a cumulative XP total lands on the leveling curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelInfo {
    pub level: u32,
    /// XP earned inside the current level. Strictly less than
    /// `xp_for_next_level`.
    pub xp_into_level: u64,
    /// Requirement to leave the current level.
    pub xp_for_next_level: u64,
}

/// XP required to leave `level`.
pub fn xp_to_advance(level: u32) -> u64 {
    (100.0 * 1.5f64.powi(level as i32 - 1)).floor() as u64
}

/// Map a cumulative XP total onto the leveling curve.
pub fn level_for(total_xp: u64) -> LevelInfo {
    let mut level = 1u32;
    let mut remaining = total_xp;
    let mut needed = xp_to_advance(level);

    while remaining >= needed {
        remaining -= needed;
        level += 1;
        needed = xp_to_advance(level);
    }

    LevelInfo {
        level,
        xp_into_level: remaining,
        xp_for_next_level: needed,
    }
}

/// Cumulative XP from an achievement set: each achievement contributes its
/// fixed XP once per earn.
pub fn total_xp(achievements: &[Achievement]) -> u64 {
    achievements
        .iter()
        .map(|a| u64::from(a.xp) * u64::from(a.count))
        .sum()
}
