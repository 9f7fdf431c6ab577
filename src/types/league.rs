//! Leagues and their clubs.

use serde::{Deserialize, Serialize};

use super::de;

/// A club within a league.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Club {
    #[serde(default, deserialize_with = "de::flex_u64")]
    pub club_id: u64,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub name: String,
}

/// A league with its clubs, as returned by the leagues-and-clubs listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    #[serde(default, deserialize_with = "de::flex_u64")]
    pub league_id: u64,
    #[serde(default, deserialize_with = "de::flex_string")]
    pub name: String,
    #[serde(default)]
    pub clubs: Vec<Club>,
}
