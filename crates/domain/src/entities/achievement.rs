//! Achievement entity - a classified real-world accomplishment
//!
//! Achievements are created the first time the matcher classifies a log entry
//! as something new. Later matches against the same achievement only bump the
//! earn count and refresh the timestamp; the XP value is fixed at creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{AchievementId, UserId};

/// A named accomplishment the user has earned at least once.
///
/// This is a data-carrying struct with no invariants to protect beyond the
/// fixed-XP rule, which is enforced by [`Achievement::record_match`] not
/// touching `xp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub user_id: UserId,
    pub title: String,
    pub description: String,
    pub emoji: String,
    /// XP granted per earn. Fixed at creation, never recomputed.
    pub xp: u32,
    /// How many times this achievement has been earned.
    pub count: u32,
    pub last_earned: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Achievement {
    pub fn new(
        user_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        emoji: impl Into<String>,
        xp: u32,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AchievementId::new(),
            user_id,
            title: title.into(),
            description: description.into(),
            emoji: emoji.into(),
            xp,
            count: 1,
            last_earned: now,
            created_at: now,
        }
    }

    /// Record a repeat earn: bump the count and refresh the timestamp.
    ///
    /// The stored XP is deliberately left alone, even when the matcher
    /// computed a fresh value for this event.
    pub fn record_match(&mut self, now: DateTime<Utc>) {
        self.count += 1;
        self.last_earned = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_match_bumps_count_and_keeps_xp() {
        let t0 = Utc::now();
        let mut achievement =
            Achievement::new(UserId::new(), "Bug Slayer", "Fixed a bug", "🐛", 30, t0);
        let later = t0 + chrono::Duration::hours(3);

        achievement.record_match(later);

        assert_eq!(achievement.count, 2);
        assert_eq!(achievement.last_earned, later);
        assert_eq!(achievement.xp, 30);
        assert_eq!(achievement.created_at, t0);
    }
}
