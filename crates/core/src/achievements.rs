//! Gamification state: unlocked achievements, XP and level.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// XP needed per level.
pub const XP_PER_LEVEL: u32 = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievements {
    pub unlocked: Vec<String>,
    pub xp: u32,
    pub level: u32,
    pub streak: u32,
}

impl Default for Achievements {
    fn default() -> Self {
        Self {
            unlocked: Vec::new(),
            xp: 0,
            level: 1,
            streak: 0,
        }
    }
}

/// Request body for `POST /achievements`.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UnlockRequest {
    #[validate(length(min = 1, max = 100))]
    pub achievement_id: String,
    #[serde(default)]
    #[validate(range(max = 100_000))]
    pub xp: u32,
}

pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

impl Achievements {
    /// Unlock an achievement and award its XP. Returns `false` (and changes
    /// nothing) if it was already unlocked.
    pub fn unlock(&mut self, achievement_id: &str, xp: u32) -> bool {
        if self.unlocked.iter().any(|a| a == achievement_id) {
            return false;
        }
        self.unlocked.push(achievement_id.to_string());
        self.xp = self.xp.saturating_add(xp);
        self.level = level_for_xp(self.xp);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlock_awards_xp_and_levels() {
        let mut a = Achievements::default();
        assert!(a.unlock("first-module", 600));
        assert_eq!(a.level, 1);
        assert!(a.unlock("first-quiz", 500));
        assert_eq!(a.xp, 1100);
        assert_eq!(a.level, 2);
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut a = Achievements::default();
        a.unlock("streak-7", 300);
        assert!(!a.unlock("streak-7", 300));
        assert_eq!(a.xp, 300);
        assert_eq!(a.unlocked.len(), 1);
    }

    #[test]
    fn level_boundaries() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(999), 1);
        assert_eq!(level_for_xp(1000), 2);
    }
}
