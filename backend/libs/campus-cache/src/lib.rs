//! Campus response cache
//!
//! In-memory TTL cache for feed reads:
//! - Versioned key schema shared by every reader
//! - Lazy expiry: stale entries are dropped when read, there is no sweeper
//! - Prefix invalidation for mutations
//! - Hit/miss counters
//!
//! One cache is built at the composition root and shared through `Arc`.

mod error;
mod keys;
mod stats;

pub use error::{CacheError, CacheResult};
pub use keys::{CacheKey, CACHE_VERSION};
pub use stats::CacheStats;

use parking_lot::Mutex;
use serde::{de::DeserializeOwned, Serialize};
use stats::StatsCollector;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

/// Default TTL values
pub mod ttl {
    use std::time::Duration;

    pub const DEFAULT: Duration = Duration::from_millis(300_000); // 5 minutes
}

#[derive(Debug, Clone)]
struct CacheEntry {
    data: serde_json::Value,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.stored_at) > self.ttl
    }
}

/// Keyed TTL cache holding JSON values
#[derive(Debug)]
pub struct ResponseCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
    stats: StatsCollector,
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(ttl::DEFAULT)
    }
}

impl ResponseCache {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_ttl,
            stats: StatsCollector::default(),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Store a value under `key` for `ttl`, replacing any previous entry
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T, ttl: Duration) -> CacheResult<()> {
        let data = serde_json::to_value(value)?;
        self.entries.lock().insert(
            key.to_string(),
            CacheEntry {
                data,
                stored_at: Instant::now(),
                ttl,
            },
        );
        self.stats.record_write();
        debug!("Cached {} with TTL={:?}", key, ttl);
        Ok(())
    }

    /// Store a value with the cache's default TTL
    pub fn set_default<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> CacheResult<()> {
        self.set(key, value, self.default_ttl)
    }

    /// Read a value; an expired entry is removed and reported as a miss
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let data = {
            let mut entries = self.entries.lock();
            match entries.get(key) {
                None => None,
                Some(entry) if entry.is_expired(Instant::now()) => {
                    entries.remove(key);
                    self.stats.record_expiration();
                    debug!("Cache entry expired for {}", key);
                    return Ok(None);
                }
                Some(entry) => Some(entry.data.clone()),
            }
        };

        match data {
            Some(value) => {
                self.stats.record_hit();
                debug!("Cache hit for {}", key);
                Ok(Some(serde_json::from_value(value)?))
            }
            None => {
                self.stats.record_miss();
                debug!("Cache miss for {}", key);
                Ok(None)
            }
        }
    }

    /// Drop one entry
    pub fn invalidate(&self, key: &str) -> bool {
        self.entries.lock().remove(key).is_some()
    }

    /// Drop every entry whose key starts with `prefix`, returning how many were removed
    pub fn invalidate_prefix(&self, prefix: &str) -> usize {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        let removed = before - entries.len();
        if removed > 0 {
            debug!("Invalidated {} cache entries with prefix {}", removed, prefix);
        }
        removed
    }

    /// Drop everything
    pub fn clear(&self) {
        self.entries.lock().clear();
    }

    /// Number of stored entries, expired ones included until they are read
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        id: String,
        likes: u64,
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_before_and_after_ttl() {
        let cache = ResponseCache::default();
        cache.set("k", &"v", Duration::from_millis(1)).unwrap();

        assert_eq!(cache.get::<String>("k").unwrap(), Some("v".to_string()));

        tokio::time::advance(Duration::from_millis(2)).await;

        assert_eq!(cache.get::<String>("k").unwrap(), None);
        // Lazy eviction is stable
        assert_eq!(cache.get::<String>("k").unwrap(), None);
        assert!(cache.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_alive_at_exact_ttl() {
        let cache = ResponseCache::default();
        cache.set("k", &1u32, Duration::from_millis(100)).unwrap();

        tokio::time::advance(Duration::from_millis(100)).await;

        assert_eq!(cache.get::<u32>("k").unwrap(), Some(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_default_ttl_is_five_minutes() {
        let cache = ResponseCache::default();
        cache.set_default("post", &Snapshot { id: "p1".into(), likes: 3 }).unwrap();

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(cache.get::<Snapshot>("post").unwrap().is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(cache.get::<Snapshot>("post").unwrap().is_none());
    }

    #[test]
    fn test_typed_round_trip() {
        let cache = ResponseCache::default();
        let value = Snapshot { id: "p1".into(), likes: 42 };
        cache.set_default("post:p1", &value).unwrap();

        assert_eq!(cache.get::<Snapshot>("post:p1").unwrap(), Some(value));
    }

    #[test]
    fn test_wrong_type_is_an_error() {
        let cache = ResponseCache::default();
        cache.set_default("k", &"text").unwrap();

        assert!(matches!(cache.get::<u64>("k"), Err(CacheError::Serialization(_))));
    }

    #[test]
    fn test_clear_drops_everything() {
        let cache = ResponseCache::default();
        cache.set_default("a", &1).unwrap();
        cache.set_default("b", &2).unwrap();

        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.get::<i32>("a").unwrap(), None);
    }

    #[test]
    fn test_invalidate_prefix() {
        let cache = ResponseCache::default();
        cache.set_default(&CacheKey::post("p1"), &1).unwrap();
        cache.set_default(&CacheKey::feed_list([("page", "1")]), &2).unwrap();
        cache.set_default("other:key", &3).unwrap();

        let removed = cache.invalidate_prefix(&CacheKey::feed_prefix());

        assert_eq!(removed, 2);
        assert_eq!(cache.len(), 1);
        assert!(cache.invalidate("other:key"));
        assert!(!cache.invalidate("other:key"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stats_track_hits_misses_and_expirations() {
        let cache = ResponseCache::default();
        cache.set("k", &1, Duration::from_millis(10)).unwrap();

        let _ = cache.get::<i32>("k");
        let _ = cache.get::<i32>("missing");
        tokio::time::advance(Duration::from_millis(11)).await;
        let _ = cache.get::<i32>("k");

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.writes, 1);
    }
}
