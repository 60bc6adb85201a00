//! Repository for mentor chat history (`chat:{user}`).

use learnpath_core::chat::ChatEntry;
use learnpath_core::keys;
use learnpath_core::types::UserId;

use crate::error::StoreError;
use crate::kv::{get_json, put_json, KvStore};

pub struct ChatRepo;

impl ChatRepo {
    /// Stored history, oldest first. Empty when the user never chatted.
    pub async fn history(store: &dyn KvStore, user_id: UserId) -> Result<Vec<ChatEntry>, StoreError> {
        Ok(get_json(store, &keys::chat(user_id)).await?.unwrap_or_default())
    }

    pub async fn save(
        store: &dyn KvStore,
        user_id: UserId,
        history: &[ChatEntry],
    ) -> Result<(), StoreError> {
        put_json(store, &keys::chat(user_id), &history).await
    }
}
