//! Repository for learner profiles (`profile:{user}`).

use learnpath_core::keys;
use learnpath_core::profile::Profile;
use learnpath_core::types::UserId;

use crate::error::StoreError;
use crate::kv::{get_json, put_json, KvStore};

pub struct ProfileRepo;

impl ProfileRepo {
    pub async fn find(store: &dyn KvStore, user_id: UserId) -> Result<Option<Profile>, StoreError> {
        get_json(store, &keys::profile(user_id)).await
    }

    /// Insert or replace the profile of `profile.user_id`.
    pub async fn save(store: &dyn KvStore, profile: &Profile) -> Result<(), StoreError> {
        put_json(store, &keys::profile(profile.user_id), profile).await
    }
}
