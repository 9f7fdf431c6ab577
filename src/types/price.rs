//! Player price records and the wire shapes they decode from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::Platform;
use super::de;

/// Market price of one player card on one platform.
///
/// A lookup for an identifier the upstream has no data for yields the
/// zero-value record, never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPrice {
    /// Current lowest listed price.
    #[serde(
        default,
        rename(deserialize = "LCPrice"),
        deserialize_with = "de::flex_u64"
    )]
    pub price: u64,
    /// Price floor enforced by the market.
    #[serde(
        default,
        rename(deserialize = "MinPrice"),
        deserialize_with = "de::flex_u64"
    )]
    pub min_price: u64,
    /// Price ceiling enforced by the market.
    #[serde(
        default,
        rename(deserialize = "MaxPrice"),
        deserialize_with = "de::flex_u64"
    )]
    pub max_price: u64,
    /// Upstream freshness hint, e.g. "5 mins ago". Free-form.
    #[serde(default, deserialize_with = "de::flex_string")]
    pub updated: String,
}

/// Per-player node of the `getPlayersPrice` response: prices keyed by
/// platform wire value.
#[derive(Debug, Default, Deserialize)]
struct PriceNode {
    #[serde(default)]
    prices: HashMap<String, PlayerPrice>,
}

/// Whole `getPlayersPrice` body: an object keyed by player id string.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct PriceBook(HashMap<String, PriceNode>);

impl PriceBook {
    /// Price for one id on one platform, zero-valued when either level
    /// of the drill-down is missing.
    pub(crate) fn platform_price(&self, id: &str, platform: Platform) -> PlayerPrice {
        self.0
            .get(id)
            .and_then(|node| node.prices.get(platform.as_str()))
            .cloned()
            .unwrap_or_default()
    }
}

/// Body of `fetchPriceInformation` (lookup by EA resource id): the price
/// fields live at the top level under different names.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawResourcePrice {
    #[serde(default, deserialize_with = "de::flex_u64")]
    price: u64,
    #[serde(default, rename = "MinPrice", deserialize_with = "de::flex_u64")]
    min_price: u64,
    #[serde(default, rename = "MaxPrice", deserialize_with = "de::flex_u64")]
    max_price: u64,
    #[serde(default, deserialize_with = "de::flex_string")]
    updated: String,
}

impl From<RawResourcePrice> for PlayerPrice {
    fn from(raw: RawResourcePrice) -> Self {
        PlayerPrice {
            price: raw.price,
            min_price: raw.min_price,
            max_price: raw.max_price,
            updated: raw.updated,
        }
    }
}
