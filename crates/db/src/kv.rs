//! Key-value storage.
//!
//! Values are JSON documents addressed by string keys. Writes are
//! last-write-wins; there is no expiry and no cross-key transaction.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::error::StoreError;

/// Table holding the system of record.
pub const RECORDS_TABLE: &str = "kv_records";

/// Table holding memoized model output.
pub const CACHE_TABLE: &str = "content_cache";

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// All entries whose key starts with `prefix`, ordered by key.
    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError>;

    /// Remove a key. Returns `true` if it existed.
    async fn delete(&self, key: &str) -> Result<bool, StoreError>;

    /// Confirm the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

pub type SharedStore = Arc<dyn KvStore>;

/// Decode a value read from `key`.
pub fn decode_value<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|source| StoreError::Corrupt {
        key: key.to_string(),
        source,
    })
}

/// Read and decode a typed value.
pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    store
        .get(key)
        .await?
        .map(|value| decode_value(key, value))
        .transpose()
}

/// Encode and write a typed value.
pub async fn put_json<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let value = serde_json::to_value(value).map_err(|source| StoreError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, value).await
}

/// Escape `LIKE` metacharacters so a prefix matches literally.
fn like_prefix(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for ch in prefix.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

// ---------------------------------------------------------------------------
// Postgres
// ---------------------------------------------------------------------------

/// [`KvStore`] over a `(key TEXT PRIMARY KEY, value JSONB)` table.
#[derive(Clone)]
pub struct PgKvStore {
    pool: PgPool,
    table: &'static str,
}

impl PgKvStore {
    /// Store backed by the system-of-record table.
    pub fn records(pool: PgPool) -> Self {
        Self {
            pool,
            table: RECORDS_TABLE,
        }
    }

    /// Store backed by the memoization table.
    pub fn cache(pool: PgPool) -> Self {
        Self {
            pool,
            table: CACHE_TABLE,
        }
    }
}

#[async_trait]
impl KvStore for PgKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let query = format!("SELECT value FROM {} WHERE key = $1", self.table);
        let value = sqlx::query_scalar::<_, Value>(&query)
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let query = format!(
            "INSERT INTO {table} (key, value) VALUES ($1, $2) \
             ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value, updated_at = NOW()",
            table = self.table
        );
        sqlx::query(&query)
            .bind(key)
            .bind(&value)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let query = format!(
            "SELECT key, value FROM {} WHERE key LIKE $1 ESCAPE '\\' ORDER BY key",
            self.table
        );
        let entries = sqlx::query_as::<_, (String, Value)>(&query)
            .bind(like_prefix(prefix))
            .fetch_all(&self.pool)
            .await?;
        Ok(entries)
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        let query = format!("DELETE FROM {} WHERE key = $1", self.table);
        let result = sqlx::query(&query).bind(key).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// In-memory
// ---------------------------------------------------------------------------

/// Process-local [`KvStore`] for tests and local development.
#[derive(Default)]
pub struct MemoryKvStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>, StoreError> {
        let entries = self.entries.read().await;
        Ok(entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.write().await.remove(key).is_some())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
