//! One-shot adapters: build a transient client, make one call, drop it.
//!
//! Thin wrappers over the [`FutClient`](super::FutClient) methods for
//! callers outside a structured scope, such as scripts or single CLI
//! commands.
//! Each call opens its own connection pool and releases it on return,
//! success or error. Results are identical to the persistent-client mode;
//! only connection reuse differs. The response cache is disabled because
//! a per-call client never lives long enough to hit it.

use std::collections::HashMap;

use super::FutClient;
use crate::Result;
use crate::types::{
    CardVersionInfo, FullPlayer, League, Platform, PlayerPrice, PopularPlayer, SearchOptions,
};

fn transient_client() -> Result<FutClient> {
    FutClient::builder().disable_cache().build()
}

/// One-shot [`FutClient::player_price`].
pub async fn player_price(player_id: u64, platform: Platform) -> Result<PlayerPrice> {
    transient_client()?.player_price(player_id, platform).await
}

/// One-shot [`FutClient::player_prices`].
pub async fn player_prices(
    player_ids: &[u64],
    platform: Platform,
) -> Result<HashMap<u64, PlayerPrice>> {
    transient_client()?.player_prices(player_ids, platform).await
}

/// One-shot [`FutClient::search`].
pub async fn search(options: &SearchOptions) -> Result<Vec<FullPlayer>> {
    transient_client()?.search(options).await
}

/// One-shot [`FutClient::popular_players`].
pub async fn popular_players() -> Result<Vec<PopularPlayer>> {
    transient_client()?.popular_players().await
}

/// One-shot [`FutClient::totw`].
pub async fn totw() -> Result<Vec<FullPlayer>> {
    transient_client()?.totw().await
}

/// One-shot [`FutClient::latest_players`].
pub async fn latest_players() -> Result<Vec<FullPlayer>> {
    transient_client()?.latest_players().await
}

/// One-shot [`FutClient::leagues_and_clubs`].
pub async fn leagues_and_clubs() -> Result<Vec<League>> {
    transient_client()?.leagues_and_clubs().await
}

/// One-shot [`FutClient::card_versions`].
pub async fn card_versions() -> Result<Vec<CardVersionInfo>> {
    transient_client()?.card_versions().await
}
