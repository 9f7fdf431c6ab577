//! Client façade: one method per remote operation.
//!
//! [`FutClient`] composes the response cache, retry policy, batch
//! orchestrator, and transport. Every operation follows the same path:
//! derive a cache key from the operation name and canonicalized arguments,
//! consult the cache, on miss fetch through the retry-wrapped transport
//! (batched and gated for the concurrent bulk path), decode into the typed
//! result, populate the cache, return. Errors are never swallowed here;
//! presenting them is the caller's concern.
//!
//! # Usage modes
//!
//! Holding a `FutClient` is the persistent mode: the connection pool and
//! cache live until the value is dropped, and drop releases them on every
//! exit path. The [`oneshot`] module wraps the same methods for callers
//! that want a transient per-call client. Both modes return identical
//! values for identical inputs.
//!
//! ```rust,no_run
//! use futmarket::{FutClient, Platform};
//!
//! #[tokio::main]
//! async fn main() -> futmarket::Result<()> {
//!     let client = FutClient::builder().build()?;
//!     let price = client.player_price(158023, Platform::Ps).await?;
//!     println!("{} coins", price.price);
//!     Ok(())
//! }
//! ```

pub mod oneshot;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderName, HeaderValue};
use serde::Deserialize;
use tokio::sync::Semaphore;

use crate::batch::{self, DEFAULT_BATCH_SIZE, DEFAULT_MAX_CONCURRENCY};
use crate::cache::{CacheConfig, ResponseCache, cache_key};
use crate::retry::{RetryConfig, with_retry};
use crate::transport::{DEFAULT_API_BASE, RotatingUserAgents, Transport, UserAgentProvider};
use crate::types::{
    CardVersionInfo, ChemistryStyle, FullPlayer, League, ManagerCard, Platform, PlayerPrice,
    PopularPlayer, PriceBook, RawResourcePrice, SearchOptions,
};
use crate::{FutmarketError, Result};

// Endpoint path segments of the JSON API.
const PATH_PLAYERS_PRICE: &str = "getPlayersPrice";
const PATH_PRICE_BY_RESOURCE: &str = "fetchPriceInformation";
const PATH_POPULAR: &str = "getPopularPlayers";
const PATH_FILTERED: &str = "getFilteredPlayers";
const PATH_TOTW: &str = "currentTOTW";
const PATH_NEW: &str = "newPlayers";
const PATH_LEAGUES: &str = "getLeaguesAndClubsAndroid";
const PATH_VERSIONS: &str = "getCardVersions";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Listing responses wrap their rows in a `data` array; a missing array
/// decodes to an empty listing, which is a legitimate result.
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    #[serde(default)]
    data: Vec<T>,
}

/// Client for the player-market API.
///
/// Cheap to construct; owns a connection pool that is reused across calls
/// and released on drop. See the [module docs](self) for the composition
/// and usage modes.
pub struct FutClient {
    transport: Transport,
    retry: RetryConfig,
    cache: Option<ResponseCache>,
    batch_size: usize,
    /// Concurrency gate for batched bulk lookups. Owned by the client so
    /// overlapping bulk calls share one in-flight bound.
    gate: Arc<Semaphore>,
}

impl FutClient {
    /// Create a builder with the default configuration.
    pub fn builder() -> FutClientBuilder {
        FutClientBuilder::new()
    }

    /// Look up the price of one player by its database id.
    ///
    /// Returns the zero-value record when the upstream has no data for
    /// the id; only transport and decode failures error.
    pub async fn player_price(&self, player_id: u64, platform: Platform) -> Result<PlayerPrice> {
        let id = player_id.to_string();
        let key = cache_key("player_price", &[&id, platform.as_str()]);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_price("player_price", key).await {
                return Ok(hit);
            }
        }

        let params = [
            ("player_ids", id.clone()),
            ("platform", platform.as_str().to_string()),
        ];
        let book: PriceBook = with_retry(&self.retry, "player_price", || {
            self.transport.get("player_price", PATH_PLAYERS_PRICE, &params)
        })
        .await?;
        let price = book.platform_price(&id, platform);

        if let Some(cache) = &self.cache {
            cache.insert_price(key, price.clone()).await;
        }
        Ok(price)
    }

    /// Look up a price by EA resource id instead of database id.
    pub async fn player_price_by_resource(
        &self,
        resource_id: u64,
        platform: Platform,
    ) -> Result<PlayerPrice> {
        let id = resource_id.to_string();
        let key = cache_key("player_price_by_resource", &[&id, platform.as_str()]);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_price("player_price_by_resource", key).await {
                return Ok(hit);
            }
        }

        let params = [
            ("playerresource", id),
            ("platform", platform.as_str().to_string()),
        ];
        let raw: RawResourcePrice = with_retry(&self.retry, "player_price_by_resource", || {
            self.transport
                .get("player_price_by_resource", PATH_PRICE_BY_RESOURCE, &params)
        })
        .await?;
        let price = PlayerPrice::from(raw);

        if let Some(cache) = &self.cache {
            cache.insert_price(key, price.clone()).await;
        }
        Ok(price)
    }

    /// Look up prices for many players in one upstream request.
    ///
    /// The result has exactly one entry per unique input id; ids the
    /// upstream has no data for map to the zero-value record.
    pub async fn player_prices(
        &self,
        player_ids: &[u64],
        platform: Platform,
    ) -> Result<HashMap<u64, PlayerPrice>> {
        let key = self.price_map_key(player_ids, platform);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_price_map("player_prices", key).await {
                return Ok(hit);
            }
        }

        let prices = self.fetch_price_batch(player_ids, platform).await?;

        if let Some(cache) = &self.cache {
            cache.insert_price_map(key, prices.clone()).await;
        }
        Ok(prices)
    }

    /// Like [`player_prices`](Self::player_prices), but split into batches
    /// dispatched concurrently under the client's gate.
    ///
    /// Value-identical to the sequential variant for the same inputs
    /// (only request count and latency differ), so it shares its cache
    /// key. A single failed batch fails the whole call.
    pub async fn player_prices_concurrent(
        &self,
        player_ids: &[u64],
        platform: Platform,
    ) -> Result<HashMap<u64, PlayerPrice>> {
        let key = self.price_map_key(player_ids, platform);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_price_map("player_prices", key).await {
                return Ok(hit);
            }
        }

        let prices = batch::fetch_many(player_ids, self.batch_size, &self.gate, |ids| async move {
            self.fetch_price_batch(&ids, platform).await
        })
        .await?;

        if let Some(cache) = &self.cache {
            cache.insert_price_map(key, prices.clone()).await;
        }
        Ok(prices)
    }

    /// Search players with the given filter criteria.
    ///
    /// Rating bounds are transmitted upstream *and* re-applied to the
    /// decoded rows, so the filter contract holds even if the upstream
    /// ignores the parameter.
    pub async fn search(&self, options: &SearchOptions) -> Result<Vec<FullPlayer>> {
        let params = options.to_params();
        let canonical: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let parts: Vec<&str> = canonical.iter().map(String::as_str).collect();
        let key = cache_key("search", &parts);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_players("search", key).await {
                return Ok(hit);
            }
        }

        let envelope: DataEnvelope<FullPlayer> = with_retry(&self.retry, "search", || {
            self.transport.get("search", PATH_FILTERED, &params)
        })
        .await?;

        let min = options.min_rating.unwrap_or(0);
        let max = options.max_rating.unwrap_or(u32::MAX);
        let players: Vec<FullPlayer> = envelope
            .data
            .into_iter()
            .filter(|p| p.rating >= min && p.rating <= max)
            .collect();

        if let Some(cache) = &self.cache {
            cache.insert_players(key, players.clone()).await;
        }
        Ok(players)
    }

    /// Currently trending players. May legitimately be empty.
    pub async fn popular_players(&self) -> Result<Vec<PopularPlayer>> {
        let key = cache_key("popular_players", &[]);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_popular("popular_players", key).await {
                return Ok(hit);
            }
        }

        let envelope: DataEnvelope<PopularPlayer> =
            with_retry(&self.retry, "popular_players", || {
                self.transport.get("popular_players", PATH_POPULAR, &[])
            })
            .await?;

        if let Some(cache) = &self.cache {
            cache.insert_popular(key, envelope.data.clone()).await;
        }
        Ok(envelope.data)
    }

    /// Current Team of the Week. Empty between squad releases.
    pub async fn totw(&self) -> Result<Vec<FullPlayer>> {
        self.player_listing("totw", PATH_TOTW).await
    }

    /// Players most recently added to the database.
    pub async fn latest_players(&self) -> Result<Vec<FullPlayer>> {
        self.player_listing("latest_players", PATH_NEW).await
    }

    /// All leagues with their clubs.
    pub async fn leagues_and_clubs(&self) -> Result<Vec<League>> {
        let key = cache_key("leagues_and_clubs", &[]);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_leagues("leagues_and_clubs", key).await {
                return Ok(hit);
            }
        }

        let envelope: DataEnvelope<League> = with_retry(&self.retry, "leagues_and_clubs", || {
            self.transport.get("leagues_and_clubs", PATH_LEAGUES, &[])
        })
        .await?;

        if let Some(cache) = &self.cache {
            cache.insert_leagues(key, envelope.data.clone()).await;
        }
        Ok(envelope.data)
    }

    /// The card-versions catalogue.
    pub async fn card_versions(&self) -> Result<Vec<CardVersionInfo>> {
        let key = cache_key("card_versions", &[]);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_card_versions("card_versions", key).await {
                return Ok(hit);
            }
        }

        let envelope: DataEnvelope<CardVersionInfo> =
            with_retry(&self.retry, "card_versions", || {
                self.transport.get("card_versions", PATH_VERSIONS, &[])
            })
            .await?;

        if let Some(cache) = &self.cache {
            cache.insert_card_versions(key, envelope.data.clone()).await;
        }
        Ok(envelope.data)
    }

    /// Chemistry style prices. Upstream only serves these as scraped HTML;
    /// not implemented.
    pub async fn chemistry_styles(&self) -> Result<Vec<ChemistryStyle>> {
        Err(FutmarketError::NotImplemented("chemistry_styles"))
    }

    /// Manager card prices. Upstream only serves these as scraped HTML;
    /// not implemented.
    pub async fn manager_cards(&self) -> Result<Vec<ManagerCard>> {
        Err(FutmarketError::NotImplemented("manager_cards"))
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        if let Some(cache) = &self.cache {
            cache.clear();
        }
    }

    /// One price request for `ids`, mapped back so that every requested id
    /// has an entry (zero-valued when absent in the response).
    async fn fetch_price_batch(
        &self,
        ids: &[u64],
        platform: Platform,
    ) -> Result<HashMap<u64, PlayerPrice>> {
        let joined = join_ids(ids);
        let params = [
            ("player_ids", joined),
            ("platform", platform.as_str().to_string()),
        ];
        let book: PriceBook = with_retry(&self.retry, "player_prices", || {
            self.transport.get("player_prices", PATH_PLAYERS_PRICE, &params)
        })
        .await?;

        Ok(ids
            .iter()
            .map(|id| (*id, book.platform_price(&id.to_string(), platform)))
            .collect())
    }

    /// Shared fetch path for platform-free `FullPlayer` listings.
    async fn player_listing(
        &self,
        operation: &'static str,
        path: &'static str,
    ) -> Result<Vec<FullPlayer>> {
        let key = cache_key(operation, &[]);
        if let Some(cache) = &self.cache {
            if let Some(hit) = cache.get_players(operation, key).await {
                return Ok(hit);
            }
        }

        let envelope: DataEnvelope<FullPlayer> = with_retry(&self.retry, operation, || {
            self.transport.get(operation, path, &[])
        })
        .await?;

        if let Some(cache) = &self.cache {
            cache.insert_players(key, envelope.data.clone()).await;
        }
        Ok(envelope.data)
    }

    /// Sequential and concurrent bulk lookups share one key: their results
    /// are value-identical by contract.
    fn price_map_key(&self, ids: &[u64], platform: Platform) -> u64 {
        let joined = join_ids(ids);
        cache_key("player_prices", &[&joined, platform.as_str()])
    }
}

fn join_ids(ids: &[u64]) -> String {
    ids.iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Builder for [`FutClient`].
pub struct FutClientBuilder {
    timeout: Duration,
    proxy: Option<String>,
    api_base: String,
    headers: Vec<(String, String)>,
    user_agents: Option<Arc<dyn UserAgentProvider>>,
    retry: RetryConfig,
    cache: Option<CacheConfig>,
    batch_size: usize,
    max_concurrency: usize,
}

impl FutClientBuilder {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            api_base: DEFAULT_API_BASE.to_string(),
            headers: Vec::new(),
            user_agents: None,
            retry: RetryConfig::default(),
            cache: Some(CacheConfig::default()),
            batch_size: DEFAULT_BATCH_SIZE,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Set the request timeout (default: 30s).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Route requests through the given proxy URL.
    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Override the API base URL (primarily for tests against a mock
    /// server).
    pub fn api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Add a header to every request. Overrides the defaults on
    /// collision.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the User-Agent source (default: rotating pool).
    pub fn user_agents(mut self, provider: Arc<dyn UserAgentProvider>) -> Self {
        self.user_agents = Some(provider);
        self
    }

    /// Set the retry policy (default: 3 attempts, 2s fixed delay).
    pub fn retry(mut self, config: RetryConfig) -> Self {
        self.retry = config;
        self
    }

    /// Set the response cache configuration (default: 180s TTL, 1,000
    /// entries).
    pub fn cache(mut self, config: CacheConfig) -> Self {
        self.cache = Some(config);
        self
    }

    /// Turn the response cache off. Changes request volume only, never
    /// returned values.
    pub fn disable_cache(mut self) -> Self {
        self.cache = None;
        self
    }

    /// Identifiers per upstream request in concurrent bulk lookups
    /// (default: 50).
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Maximum concurrently in-flight batches (default: 5). Keep modest;
    /// the upstream rate-limits.
    pub fn max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<FutClient> {
        let mut http = reqwest::Client::builder().timeout(self.timeout);
        if let Some(url) = &self.proxy {
            let proxy = reqwest::Proxy::all(url)
                .map_err(|e| FutmarketError::Configuration(format!("invalid proxy: {e}")))?;
            http = http.proxy(proxy);
        }
        let http = http.build()?;

        let mut extra_headers = Vec::with_capacity(self.headers.len());
        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| FutmarketError::Configuration(format!("invalid header name: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| FutmarketError::Configuration(format!("invalid header value: {e}")))?;
            extra_headers.push((name, value));
        }

        let user_agents = self
            .user_agents
            .unwrap_or_else(|| Arc::new(RotatingUserAgents::new()));

        Ok(FutClient {
            transport: Transport::new(http, self.api_base, user_agents, extra_headers),
            retry: self.retry,
            cache: self.cache.as_ref().map(ResponseCache::new),
            batch_size: self.batch_size,
            gate: Arc::new(Semaphore::new(self.max_concurrency)),
        })
    }
}

impl Default for FutClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
