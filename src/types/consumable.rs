//! Consumable card models (chemistry styles, manager cards).
//!
//! The upstream only exposes these as scraped HTML pages, so the client
//! operations returning them are stubs that fail with `NotImplemented`.
//! The record shapes are kept so callers can code against them.

use serde::{Deserialize, Serialize};

/// A chemistry style consumable and its per-platform prices.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChemistryStyle {
    pub name: String,
    /// EA card subtype id.
    pub ea_id: u64,
    pub price_ps: u64,
    pub price_pc: u64,
    pub min_price_ps: u64,
    pub max_price_ps: u64,
    pub min_price_pc: u64,
    pub max_price_pc: u64,
    /// Attribute boost description, e.g. "+2 PAC".
    pub boost: String,
    pub preferred_positions: Vec<String>,
}

/// A manager card per nation, priced per tier and platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerCard {
    pub nation: String,
    pub nation_id: u64,
    pub bronze_price_ps: u64,
    pub bronze_price_pc: u64,
    pub silver_price_ps: u64,
    pub silver_price_pc: u64,
    pub gold_price_ps: u64,
    pub gold_price_pc: u64,
}
