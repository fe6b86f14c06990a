//! Read-through TTL cache engine
//!
//! [`TtlCache::get`] is the whole policy: serve the stored value while it is
//! younger than the caller's TTL, otherwise run the caller's fetch and stamp
//! the result into the store. The engine never retries, never times out, and
//! never serves stale data to paper over a failed fetch — the caller sees the
//! fetch error and the old entry stays put for the next attempt.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use serde::{Serialize, de::DeserializeOwned};

use super::store::CacheStore;
use crate::error::CacheError;

type Result<T> = std::result::Result<T, CacheError>;

/// TTL-based read-through cache over a [`CacheStore`].
///
/// Freshness is a per-call parameter, so one store serves entity types with
/// different volatility. Storage faults degrade gracefully: a failed read is
/// a miss, a failed write is logged and the fetched value is still returned.
///
/// By default two concurrent `get` calls for the same stale key both fetch
/// and both write (last write wins; each write is internally consistent).
/// [`TtlCache::with_coalescing`] opts into sharing one in-flight fetch per key.
pub struct TtlCache {
    store: Mutex<CacheStore>,
    coalesce: bool,
    key_locks: tokio::sync::Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl TtlCache {
    /// Create a cache with the baseline (non-coalescing) miss behavior.
    pub fn new(store: CacheStore) -> Self {
        Self {
            store: Mutex::new(store),
            coalesce: false,
            key_locks: tokio::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Create a cache that coalesces concurrent misses per key.
    ///
    /// A miss takes a per-key lock and re-checks the store before fetching,
    /// so callers racing on the same stale key share one fetch.
    pub fn with_coalescing(store: CacheStore) -> Self {
        Self {
            coalesce: true,
            ..Self::new(store)
        }
    }

    /// Get the value for `key`, refreshing through `fetch` when stale.
    ///
    /// Fresh means `now - stored_at < ttl`. On a hit, `fetch` is not called.
    /// On a miss, `fetch` runs; its failure surfaces as
    /// [`CacheError::Fetch`] with the prior entry untouched.
    pub async fn get<T, F, Fut>(&self, key: &str, ttl: Duration, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = crate::error::Result<T>>,
    {
        if let Some(value) = self.read_fresh(key, ttl) {
            return Ok(value);
        }

        if !self.coalesce {
            return self.fetch_and_store(key, fetch).await;
        }

        let lock = self.key_lock(key).await;
        let result = {
            let _guard = lock.lock().await;
            // Another caller may have refreshed while we waited
            if let Some(value) = self.read_fresh(key, ttl) {
                Ok(value)
            } else {
                self.fetch_and_store(key, fetch).await
            }
        };
        drop(lock);
        self.release_key_lock(key).await;
        result
    }

    /// Read the stored entry if present, parseable, and within the TTL.
    ///
    /// Read faults and corrupt entries are logged and treated as misses.
    /// A negative age (clock skew) counts as fresh.
    fn read_fresh<T: DeserializeOwned>(&self, key: &str, ttl: Duration) -> Option<T> {
        let store = match self.store.lock() {
            Ok(guard) => guard,
            Err(_) => return None,
        };

        let entry = match store.read(key) {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("Cache read failed for '{}', treating as miss: {}", key, e);
                return None;
            }
        };

        let age_ms = entry.age_ms();
        if age_ms >= ttl.as_millis() as i64 {
            log::debug!("Cache stale: {} (age {}ms)", key, age_ms);
            return None;
        }

        match serde_json::from_str(&entry.value) {
            Ok(value) => {
                log::debug!("Cache hit: {}", key);
                Some(value)
            }
            Err(e) => {
                log::warn!("Malformed cache entry for '{}', treating as miss: {}", key, e);
                None
            }
        }
    }

    /// Run the fetch and best-effort persist the result.
    async fn fetch_and_store<T, F, Fut>(&self, key: &str, fetch: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = crate::error::Result<T>>,
    {
        log::debug!("Cache miss: {}, fetching", key);

        let value = fetch().await.map_err(|err| CacheError::Fetch {
            key: key.to_string(),
            source: Box::new(err),
        })?;

        // A persistence fault must not fail a read that already has its value
        match serde_json::to_string(&value) {
            Ok(json) => self.write_entry(key, &json),
            Err(e) => log::warn!("Failed to serialize cache entry for '{}': {}", key, e),
        }

        Ok(value)
    }

    fn write_entry(&self, key: &str, json: &str) {
        let Ok(store) = self.store.lock() else {
            log::warn!("Cache store lock poisoned, skipping write for '{}'", key);
            return;
        };

        let now_ms = Utc::now().timestamp_millis();
        if let Err(e) = store.write(key, json, now_ms) {
            log::warn!("Cache write failed for '{}': {}", key, e);
        }
    }

    async fn key_lock(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.key_locks.lock().await;
        locks.entry(key.to_string()).or_default().clone()
    }

    async fn release_key_lock(&self, key: &str) {
        let mut locks = self.key_locks.lock().await;
        let unused = locks
            .get(key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1);
        if unused {
            locks.remove(key);
        }
    }
}
