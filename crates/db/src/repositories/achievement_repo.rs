//! Repository for gamification state (`achievements:{user}`).

use learnpath_core::achievements::Achievements;
use learnpath_core::keys;
use learnpath_core::types::UserId;

use crate::error::StoreError;
use crate::kv::{get_json, put_json, KvStore};

pub struct AchievementRepo;

impl AchievementRepo {
    /// Stored achievements, or the level-1 default.
    pub async fn get(store: &dyn KvStore, user_id: UserId) -> Result<Achievements, StoreError> {
        Ok(get_json(store, &keys::achievements(user_id))
            .await?
            .unwrap_or_default())
    }

    pub async fn save(
        store: &dyn KvStore,
        user_id: UserId,
        achievements: &Achievements,
    ) -> Result<(), StoreError> {
        put_json(store, &keys::achievements(user_id), achievements).await
    }
}
