//! Card version catalogue entries.

use serde::{Deserialize, Serialize};

use super::de;

/// One entry of the card-versions catalogue (gold, TOTW, icon, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardVersionInfo {
    /// Stable key used in search filters, e.g. "gold_rare".
    #[serde(default, deserialize_with = "de::flex_string")]
    pub key: String,
    /// Human-readable name, e.g. "Gold Rare".
    #[serde(default, deserialize_with = "de::flex_string")]
    pub name: String,
    /// Card artwork identifier.
    #[serde(default, deserialize_with = "de::flex_string")]
    pub img: String,
}
