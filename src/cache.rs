//! Response cache for upstream lookups.
//!
//! [`ResponseCache`] caches decoded responses keyed on a content hash of
//! (operation name, canonicalized arguments). Entries expire after a TTL
//! and the store is bounded by a maximum entry count, with the cache
//! library's LRU-flavoured eviction deciding what goes first once the
//! bound is reached.
//!
//! Caching is a pure optimization: a value is only ever inserted after a
//! successful fetch, so enabling or disabling the cache changes request
//! volume and latency, never returned values. Two concurrent callers
//! missing on the same key both fetch and both insert; last write wins.
//! There is no single-flight coalescing.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use moka::future::Cache;

use crate::telemetry;
use crate::types::{CardVersionInfo, FullPlayer, League, PlayerPrice, PopularPlayer};

/// Configuration for the response cache.
///
/// ```rust
/// # use futmarket::CacheConfig;
/// # use std::time::Duration;
/// let config = CacheConfig::new()
///     .max_entries(5_000)
///     .ttl(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum number of cached entries. Default: 1,000.
    pub max_entries: u64,
    /// Time-to-live for cached entries. Default: 180s.
    pub ttl: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1_000,
            ttl: Duration::from_secs(180),
        }
    }
}

impl CacheConfig {
    /// Create a new config with the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cached entries.
    pub fn max_entries(mut self, n: u64) -> Self {
        self.max_entries = n;
        self
    }

    /// Set the time-to-live for cached entries.
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Cached response value, one variant per operation result family.
#[derive(Clone, Debug)]
enum CachedValue {
    Price(PlayerPrice),
    PriceMap(HashMap<u64, PlayerPrice>),
    Players(Vec<FullPlayer>),
    Popular(Vec<PopularPlayer>),
    Leagues(Vec<League>),
    CardVersions(Vec<CardVersionInfo>),
}

/// In-memory TTL + bounded cache for decoded upstream responses.
pub(crate) struct ResponseCache {
    cache: Cache<u64, CachedValue>,
}

macro_rules! typed_accessors {
    ($get:ident, $insert:ident, $variant:ident, $ty:ty) => {
        pub(crate) async fn $get(&self, operation: &'static str, key: u64) -> Option<$ty> {
            match self.cache.get(&key).await {
                Some(CachedValue::$variant(v)) => {
                    metrics::counter!(telemetry::CACHE_HITS_TOTAL, "operation" => operation)
                        .increment(1);
                    Some(v)
                }
                _ => {
                    metrics::counter!(telemetry::CACHE_MISSES_TOTAL, "operation" => operation)
                        .increment(1);
                    None
                }
            }
        }

        pub(crate) async fn $insert(&self, key: u64, value: $ty) {
            self.cache.insert(key, CachedValue::$variant(value)).await;
        }
    };
}

impl ResponseCache {
    /// Create a new response cache with the given configuration.
    pub(crate) fn new(config: &CacheConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_entries)
            .time_to_live(config.ttl)
            .build();
        Self { cache }
    }

    typed_accessors!(get_price, insert_price, Price, PlayerPrice);
    typed_accessors!(
        get_price_map,
        insert_price_map,
        PriceMap,
        HashMap<u64, PlayerPrice>
    );
    typed_accessors!(get_players, insert_players, Players, Vec<FullPlayer>);
    typed_accessors!(get_popular, insert_popular, Popular, Vec<PopularPlayer>);
    typed_accessors!(get_leagues, insert_leagues, Leagues, Vec<League>);
    typed_accessors!(
        get_card_versions,
        insert_card_versions,
        CardVersions,
        Vec<CardVersionInfo>
    );

    /// Evict all entries unconditionally.
    pub(crate) fn clear(&self) {
        self.cache.invalidate_all();
    }

    /// Number of entries currently held (approximate until pending
    /// maintenance runs).
    pub(crate) fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    /// Run the cache's pending maintenance tasks (eviction bookkeeping).
    pub(crate) async fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks().await;
    }
}

/// Compute a cache key from an operation name and its canonicalized
/// arguments.
///
/// Uses `DefaultHasher` (SipHash); deterministic within a process
/// lifetime, which is all an in-memory cache needs.
pub(crate) fn cache_key(operation: &str, args: &[&str]) -> u64 {
    let mut hasher = DefaultHasher::new();
    operation.hash(&mut hasher);
    for arg in args {
        arg.hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_deterministic() {
        let k1 = cache_key("player_price", &["12345", "PS"]);
        let k2 = cache_key("player_price", &["12345", "PS"]);
        assert_eq!(k1, k2);
    }

    #[test]
    fn cache_key_differs_on_operation() {
        let k1 = cache_key("player_price", &["12345", "PS"]);
        let k2 = cache_key("player_prices", &["12345", "PS"]);
        assert_ne!(k1, k2);
    }

    #[test]
    fn cache_key_differs_on_args() {
        let k1 = cache_key("player_price", &["12345", "PS"]);
        let k2 = cache_key("player_price", &["12345", "PC"]);
        assert_ne!(k1, k2);
    }

    #[test]
    fn cache_key_arg_order_matters() {
        let k1 = cache_key("search", &["minrating=85", "league=13"]);
        let k2 = cache_key("search", &["league=13", "minrating=85"]);
        assert_ne!(k1, k2);
    }

    #[tokio::test]
    async fn wrong_variant_reads_as_miss() {
        let cache = ResponseCache::new(&CacheConfig::default());
        let key = cache_key("player_price", &["1", "PS"]);
        cache.insert_price(key, PlayerPrice::default()).await;

        assert!(cache.get_players("search", key).await.is_none());
        assert!(cache.get_price("player_price", key).await.is_some());
    }

    #[tokio::test]
    async fn entry_expires_after_ttl() {
        let config = CacheConfig::new().ttl(Duration::from_millis(50));
        let cache = ResponseCache::new(&config);
        let key = cache_key("player_price", &["1", "PS"]);

        cache.insert_price(key, PlayerPrice::default()).await;
        assert!(cache.get_price("player_price", key).await.is_some());

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(cache.get_price("player_price", key).await.is_none());
    }

    #[tokio::test]
    async fn clear_removes_all_entries() {
        let cache = ResponseCache::new(&CacheConfig::default());
        for i in 0..10u64 {
            cache.insert_price(i, PlayerPrice::default()).await;
        }
        cache.clear();
        for i in 0..10u64 {
            assert!(cache.get_price("player_price", i).await.is_none());
        }
    }

    #[tokio::test]
    async fn store_stays_within_max_entries() {
        let config = CacheConfig::new().max_entries(100);
        let cache = ResponseCache::new(&config);
        for i in 0..300u64 {
            cache.insert_price(i, PlayerPrice::default()).await;
        }
        cache.run_pending_tasks().await;
        assert!(cache.entry_count() <= 100);
    }
}
