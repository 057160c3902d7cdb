//! Best-effort response cache with tag-based invalidation.
//!
//! Serialized list/detail responses are memoized in Redis under the
//! deterministic keys from `homegrid_core::cache`, and each key is
//! registered in a tag set. A write invalidates a tag, which deletes every
//! key registered under it, so no endpoint has to enumerate the key variants
//! that might have gone stale.
//!
//! Every failure path degrades to a cache miss and a fresh database read:
//! correctness never depends on a hit. When `REDIS_URL` is unset the cache
//! is [`ResponseCache::Disabled`] and every call is a no-op.

use std::time::Duration;

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::AsyncCommands;

/// TTL for cached list responses.
pub const TTL_LIST_SECS: u64 = 15 * 60;

/// TTL for cached detail responses.
pub const TTL_DETAIL_SECS: u64 = 30 * 60;

/// TTL for cached map/cluster responses, which go stale fastest.
pub const TTL_MAP_SECS: u64 = 5 * 60;

/// Tag sets outlive their members so invalidation still finds late entries.
const TAG_SET_TTL_SECS: i64 = 24 * 60 * 60;

/// Namespace for the tag sets themselves.
fn tag_set_key(tag: &str) -> String {
    format!("hg:tag:{tag}")
}

#[derive(Clone)]
pub enum ResponseCache {
    /// No cache configured; every operation is a no-op.
    Disabled,
    Redis(ConnectionManager),
}

impl ResponseCache {
    /// Connect to Redis, or fall back to [`ResponseCache::Disabled`] if the
    /// endpoint is unreachable. Startup never fails because of the cache.
    pub async fn connect(redis_url: &str) -> Self {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(500));

        let client = match redis::Client::open(redis_url) {
            Ok(client) => client,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid REDIS_URL; response cache disabled");
                return Self::Disabled;
            }
        };

        match client.get_connection_manager_with_config(config).await {
            Ok(manager) => {
                tracing::info!("Response cache connected");
                Self::Redis(manager)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Redis unreachable; response cache disabled");
                Self::Disabled
            }
        }
    }

    pub fn disabled() -> Self {
        Self::Disabled
    }

    /// Fetch a cached response. Any error is a miss.
    pub async fn get(&self, key: &str) -> Option<serde_json::Value> {
        let Self::Redis(manager) = self else {
            return None;
        };
        let mut conn = manager.clone();

        match conn.get::<_, Option<String>>(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(key, error = %e, "Discarding unparseable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::debug!(key, error = %e, "Cache read failed; treating as miss");
                None
            }
        }
    }

    /// Store a serialized response under `key` and register it with each
    /// tag. Errors are logged and ignored.
    pub async fn put(
        &self,
        key: &str,
        tags: &[String],
        value: &serde_json::Value,
        ttl_secs: u64,
    ) {
        let Self::Redis(manager) = self else {
            return;
        };
        let mut conn = manager.clone();

        let raw = value.to_string();
        if let Err(e) = conn.set_ex::<_, _, ()>(key, raw, ttl_secs).await {
            tracing::debug!(key, error = %e, "Cache write failed");
            return;
        }

        for tag in tags {
            let set_key = tag_set_key(tag);
            if let Err(e) = conn.sadd::<_, _, ()>(&set_key, key).await {
                tracing::debug!(key, tag, error = %e, "Cache tag registration failed");
                return;
            }
            let _ = conn.expire::<_, ()>(&set_key, TAG_SET_TTL_SECS).await;
        }
    }

    /// Delete every key registered under a tag, then the tag set itself.
    /// Errors are logged and ignored; a failed invalidation only means the
    /// entries live until their TTL expires.
    pub async fn invalidate(&self, tag: &str) {
        let Self::Redis(manager) = self else {
            return;
        };
        let mut conn = manager.clone();

        let set_key = tag_set_key(tag);
        let keys: Vec<String> = match conn.smembers(&set_key).await {
            Ok(keys) => keys,
            Err(e) => {
                tracing::debug!(tag, error = %e, "Cache invalidation read failed");
                return;
            }
        };

        if !keys.is_empty() {
            if let Err(e) = conn.del::<_, ()>(&keys).await {
                tracing::debug!(tag, error = %e, "Cache invalidation delete failed");
            }
        }
        let _ = conn.del::<_, ()>(&set_key).await;
    }

    /// Invalidate several tags in sequence.
    pub async fn invalidate_all(&self, tags: &[String]) {
        for tag in tags {
            self.invalidate(tag).await;
        }
    }
}
