//! Repository for per-module progress (`progress:{user}:{module}`).

use learnpath_core::keys;
use learnpath_core::progress::ProgressRecord;
use learnpath_core::types::UserId;

use crate::error::StoreError;
use crate::kv::{decode_value, get_json, put_json, KvStore};

pub struct ProgressRepo;

impl ProgressRepo {
    pub async fn find(
        store: &dyn KvStore,
        user_id: UserId,
        module_id: &str,
    ) -> Result<Option<ProgressRecord>, StoreError> {
        get_json(store, &keys::progress(user_id, module_id)).await
    }

    pub async fn save(store: &dyn KvStore, record: &ProgressRecord) -> Result<(), StoreError> {
        put_json(store, &keys::progress(record.user_id, &record.module_id), record).await
    }

    /// Every progress record of a user, ordered by module id.
    pub async fn list_for_user(
        store: &dyn KvStore,
        user_id: UserId,
    ) -> Result<Vec<ProgressRecord>, StoreError> {
        store
            .scan_prefix(&keys::progress_prefix(user_id))
            .await?
            .into_iter()
            .map(|(key, value)| decode_value(&key, value))
            .collect()
    }
}
