//! Player records returned by search and listing endpoints.

use serde::{Deserialize, Serialize};

use super::de;

/// Full player row as returned by search, TOTW, and latest-players
/// endpoints.
///
/// Every field is optional upstream; absent fields decode to zero values.
/// `name` may be empty while `common_name` is set (or the reverse), so
/// display code should fall back from one to the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullPlayer {
    #[serde(default, rename(deserialize = "ID"), deserialize_with = "de::flex_u64")]
    pub futbin_id: u64,
    #[serde(default, deserialize_with = "de::flex_u64")]
    pub resource_id: u64,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub common_name: String,
    #[serde(default, deserialize_with = "de::flex_u32")]
    pub rating: u32,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub position: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub club: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub league: String,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub nation: String,

    /// Quick prices carried on the row itself (coarser than a dedicated
    /// price lookup, but present without a second request).
    #[serde(
        default,
        rename(deserialize = "ps_LCPrice"),
        deserialize_with = "de::flex_u64"
    )]
    pub price_ps: u64,
    #[serde(
        default,
        rename(deserialize = "pc_LCPrice"),
        deserialize_with = "de::flex_u64"
    )]
    pub price_pc: u64,

    // In-game attributes
    #[serde(default, deserialize_with = "de::flex_u32")]
    pub pace: u32,
    #[serde(default, deserialize_with = "de::flex_u32")]
    pub shooting: u32,
    #[serde(default, deserialize_with = "de::flex_u32")]
    pub passing: u32,
    #[serde(default, deserialize_with = "de::flex_u32")]
    pub dribbling: u32,
    #[serde(default, deserialize_with = "de::flex_u32")]
    pub defending: u32,
    #[serde(default, deserialize_with = "de::flex_u32")]
    pub physical: u32,
}

impl FullPlayer {
    /// Display name: `name`, falling back to `common_name`.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.common_name
        } else {
            &self.name
        }
    }
}

/// Trimmed row shape of the trending/popular listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopularPlayer {
    #[serde(default, rename(deserialize = "ID"), deserialize_with = "de::flex_u64")]
    pub futbin_id: u64,
    #[serde(default, deserialize_with = "de::flex_u64")]
    pub resource_id: u64,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub name: String,
    #[serde(default, deserialize_with = "de::flex_u32")]
    pub rating: u32,
    #[serde(
        default,
        rename(deserialize = "ps_LCPrice"),
        deserialize_with = "de::flex_u64"
    )]
    pub price_ps: u64,
    #[serde(
        default,
        rename(deserialize = "pc_LCPrice"),
        deserialize_with = "de::flex_u64"
    )]
    pub price_pc: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_row_fills_defaults() {
        let row = r#"{"ID": "12345", "name": "Some Player", "rating": 88}"#;
        let p: FullPlayer = serde_json::from_str(row).unwrap();
        assert_eq!(p.futbin_id, 12345);
        assert_eq!(p.rating, 88);
        assert_eq!(p.club, "");
        assert_eq!(p.price_ps, 0);
        assert_eq!(p.pace, 0);
    }

    #[test]
    fn display_name_falls_back_to_common_name() {
        let p = FullPlayer {
            common_name: "Pelé".into(),
            ..FullPlayer::default()
        };
        assert_eq!(p.display_name(), "Pelé");
    }
}
