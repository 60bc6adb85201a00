//! Repository for roadmaps (`roadmap:{user}`). One roadmap per user;
//! regenerating replaces it.

use learnpath_core::keys;
use learnpath_core::roadmap::Roadmap;
use learnpath_core::types::UserId;

use crate::error::StoreError;
use crate::kv::{get_json, put_json, KvStore};

pub struct RoadmapRepo;

impl RoadmapRepo {
    pub async fn find(store: &dyn KvStore, user_id: UserId) -> Result<Option<Roadmap>, StoreError> {
        get_json(store, &keys::roadmap(user_id)).await
    }

    pub async fn save(store: &dyn KvStore, roadmap: &Roadmap) -> Result<(), StoreError> {
        put_json(store, &keys::roadmap(roadmap.user_id), roadmap).await
    }
}
