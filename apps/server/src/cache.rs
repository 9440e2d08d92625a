//! In-process response cache.
//!
//! Cache-aside: services look a response up by a key derived from their request
//! parameters, and on a miss compute it and store it for `ttl_seconds`. Entries
//! are evicted least-recently-used once `capacity` is reached.

use lru::LruCache;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};
use std::future::Future;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

use crate::config::CacheConfig;
use crate::{Error, Result};

struct Entry {
    value: JsonValue,
    expires_at: Instant,
}

pub struct ResponseCache {
    entries: Option<Mutex<LruCache<String, Entry>>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(config: &CacheConfig) -> Self {
        let entries = NonZeroUsize::new(config.capacity)
            .filter(|_| config.enabled)
            .map(|capacity| Mutex::new(LruCache::new(capacity)));

        Self {
            entries,
            ttl: Duration::from_secs(config.ttl_seconds),
        }
    }

    pub fn disabled() -> Self {
        Self {
            entries: None,
            ttl: Duration::ZERO,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }

    /// `namespace:` followed by the hex SHA-256 of the JSON-serialized parameters.
    pub fn key<P: Serialize + ?Sized>(namespace: &str, params: &P) -> Result<String> {
        let bytes = serde_json::to_vec(params)
            .map_err(|e| Error::Internal(format!("failed to build cache key: {e}")))?;
        Ok(format!("{namespace}:{}", hex::encode(Sha256::digest(&bytes))))
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let entries = self.entries.as_ref()?;
        let mut entries = entries.lock().await;

        let expired = match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                return serde_json::from_value(entry.value.clone()).ok();
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            entries.pop(key);
        }
        None
    }

    pub async fn insert<T: Serialize>(&self, key: String, value: &T) {
        let Some(entries) = self.entries.as_ref() else {
            return;
        };
        match serde_json::to_value(value) {
            Ok(value) => {
                entries.lock().await.put(
                    key,
                    Entry {
                        value,
                        expires_at: Instant::now() + self.ttl,
                    },
                );
            }
            Err(e) => tracing::warn!(key = %key, error = %e, "Skipping uncacheable response"),
        }
    }

    /// Return the cached value for `params`, or run `fetch` and cache its success.
    ///
    /// The lock is not held while `fetch` runs; concurrent misses for the same
    /// key may both reach the backend.
    pub async fn get_or_fetch<P, T, F, Fut>(&self, namespace: &str, params: &P, fetch: F) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if !self.is_enabled() {
            return fetch().await;
        }

        let key = Self::key(namespace, params)?;
        if let Some(hit) = self.get::<T>(&key).await {
            crate::metrics::CACHE_REQUESTS_TOTAL
                .with_label_values(&[namespace, "hit"])
                .inc();
            tracing::debug!(key = %key, "Cache hit");
            return Ok(hit);
        }

        crate::metrics::CACHE_REQUESTS_TOTAL
            .with_label_values(&[namespace, "miss"])
            .inc();
        let value = fetch().await?;
        self.insert(key, &value).await;
        Ok(value)
    }
}
