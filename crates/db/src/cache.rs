//! Memoization layer for generated content.
//!
//! [`ContentCache`] sits on its own [`KvStore`] (separate from the system of
//! record) and coalesces concurrent misses: for a given key at most one
//! generation runs at a time, and callers that queued behind it read the
//! value it wrote instead of generating again. Failed generations write
//! nothing, so the key stays uncached.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StoreError;
use crate::kv::{get_json, put_json, SharedStore};

/// Result of [`ContentCache::get_or_generate`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cached<T> {
    /// Served from the cache.
    Hit(T),
    /// Generated by this call and written to the cache.
    Generated(T),
}

impl<T> Cached<T> {
    pub fn is_hit(&self) -> bool {
        matches!(self, Cached::Hit(_))
    }

    pub fn into_inner(self) -> T {
        match self {
            Cached::Hit(v) | Cached::Generated(v) => v,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError<E> {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Generation failed: {0}")]
    Generate(E),
}

type KeyLock = Arc<tokio::sync::Mutex<()>>;

/// A caller's claim on a key's lock. Dropping it releases the map entry,
/// including when the request future is cancelled mid-generation.
struct InFlight<'a> {
    cache: &'a ContentCache,
    key: &'a str,
    lock: KeyLock,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.cache.release(self.key, &self.lock);
    }
}

pub struct ContentCache {
    store: SharedStore,
    in_flight: Mutex<HashMap<String, KeyLock>>,
}

impl ContentCache {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        get_json(self.store.as_ref(), key).await
    }

    /// Drop one entry so the next request regenerates it.
    pub async fn invalidate(&self, key: &str) -> Result<bool, StoreError> {
        let removed = self.store.delete(key).await?;
        tracing::debug!(key, removed, "Cache entry invalidated");
        Ok(removed)
    }

    /// Return the cached value for `key`, or run `generate` and cache its
    /// output.
    pub async fn get_or_generate<T, E, F, Fut>(
        &self,
        key: &str,
        generate: F,
    ) -> Result<Cached<T>, CacheError<E>>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        if let Some(value) = self.get(key).await? {
            return Ok(Cached::Hit(value));
        }

        let entry = self.enter(key);
        let _guard = entry.lock.lock().await;

        // Another caller may have filled the entry while we waited.
        if let Some(value) = self.get(key).await? {
            return Ok(Cached::Hit(value));
        }
        let value = generate().await.map_err(CacheError::Generate)?;
        put_json(self.store.as_ref(), key, &value).await?;
        Ok(Cached::Generated(value))
    }

    fn enter<'a>(&'a self, key: &'a str) -> InFlight<'a> {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        let lock = Arc::clone(in_flight.entry(key.to_string()).or_default());
        InFlight {
            cache: self,
            key,
            lock,
        }
    }

    /// Forget the key's lock once no other caller holds it.
    fn release(&self, key: &str, lock: &KeyLock) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        // One reference in the map, one held by the departing caller.
        if Arc::strong_count(lock) <= 2 {
            in_flight.remove(key);
        }
    }

    #[cfg(test)]
    fn in_flight_len(&self) -> usize {
        self.in_flight.lock().unwrap().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use assert_matches::assert_matches;

    use crate::kv::MemoryKvStore;

    fn cache() -> ContentCache {
        ContentCache::new(Arc::new(MemoryKvStore::new()))
    }

    #[tokio::test]
    async fn miss_generates_then_hit_returns_same_value() {
        let cache = cache();
        let calls = AtomicUsize::new(0);

        let first = cache
            .get_or_generate("k", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>("value".to_string())
            })
            .await
            .unwrap();
        let second = cache
            .get_or_generate("k", || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, String>("other".to_string())
            })
            .await
            .unwrap();

        assert_eq!(first, Cached::Generated("value".to_string()));
        assert_eq!(second, Cached::Hit("value".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.in_flight_len(), 0);
    }

    #[tokio::test]
    async fn failed_generation_leaves_key_uncached() {
        let cache = cache();

        let result = cache
            .get_or_generate::<String, _, _, _>("k", || async { Err("boom") })
            .await;
        assert_matches!(result, Err(CacheError::Generate("boom")));
        assert_eq!(cache.get::<String>("k").await.unwrap(), None);

        let retry = cache
            .get_or_generate("k", || async { Ok::<_, &str>("ok".to_string()) })
            .await
            .unwrap();
        assert!(!retry.is_hit());
    }

    #[tokio::test]
    async fn concurrent_misses_generate_once() {
        let cache = Arc::new(cache());
        let calls = Arc::new(AtomicUsize::new(0));

        let tasks: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let calls = Arc::clone(&calls);
                tokio::spawn(async move {
                    cache
                        .get_or_generate("shared", || async {
                            calls.fetch_add(1, Ordering::SeqCst);
                            tokio::time::sleep(Duration::from_millis(20)).await;
                            Ok::<_, String>(42u32)
                        })
                        .await
                        .unwrap()
                        .into_inner()
                })
            })
            .collect();

        for task in tasks {
            assert_eq!(task.await.unwrap(), 42);
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.in_flight_len(), 0);
    }

    #[tokio::test]
    async fn cancelled_generation_releases_the_key() {
        let cache = cache();

        let cancelled = tokio::time::timeout(
            Duration::from_millis(20),
            cache.get_or_generate("k", || async {
                std::future::pending::<Result<u32, String>>().await
            }),
        )
        .await;
        assert!(cancelled.is_err());
        assert_eq!(cache.in_flight_len(), 0);

        let retry = cache
            .get_or_generate("k", || async { Ok::<_, String>(7u32) })
            .await
            .unwrap();
        assert_eq!(retry, Cached::Generated(7));
    }

    #[tokio::test]
    async fn invalidate_forces_regeneration() {
        let cache = cache();
        cache
            .get_or_generate("k", || async { Ok::<_, String>(1u32) })
            .await
            .unwrap();

        assert!(cache.invalidate("k").await.unwrap());
        let again = cache
            .get_or_generate("k", || async { Ok::<_, String>(2u32) })
            .await
            .unwrap();
        assert_eq!(again, Cached::Generated(2));
    }
}
