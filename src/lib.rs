//! Futmarket - client for FIFA Ultimate Team player market prices
//!
//! This crate wraps an unofficial player-pricing web API behind a typed
//! [`FutClient`] façade: price lookups (single, bulk, concurrent bulk),
//! filtered player search, trending/TOTW/latest listings, and the
//! leagues and card-version catalogues. Responses are cached briefly,
//! transient network failures are retried, and bulk lookups fan out in
//! bounded concurrent batches.
//!
//! # Price lookup example
//!
//! ```rust,no_run
//! use futmarket::{FutClient, Platform};
//!
//! #[tokio::main]
//! async fn main() -> futmarket::Result<()> {
//!     let client = FutClient::builder().build()?;
//!
//!     let price = client.player_price(158023, Platform::Ps).await?;
//!     println!("current: {} (range {}..{})", price.price, price.min_price, price.max_price);
//!     Ok(())
//! }
//! ```
//!
//! # Search example
//!
//! ```rust,no_run
//! use futmarket::{FutClient, Platform, SearchOptions};
//!
//! #[tokio::main]
//! async fn main() -> futmarket::Result<()> {
//!     let client = FutClient::builder().build()?;
//!
//!     let options = SearchOptions::default()
//!         .platform(Platform::Pc)
//!         .min_rating(85)
//!         .position("ST");
//!     for player in client.search(&options).await? {
//!         println!("{} ({})", player.display_name(), player.rating);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! The upstream API is unversioned and can change shape at any time;
//! every response field is optional and decodes to a zero-value default
//! when absent.

pub mod batch;
pub mod cache;
pub mod client;
pub mod error;
pub mod retry;
pub mod telemetry;
pub mod transport;
pub mod types;

// Re-export main types at crate root
pub use error::{FutmarketError, Result};

pub use client::{FutClient, FutClientBuilder, oneshot};

pub use cache::CacheConfig;
pub use retry::RetryConfig;
pub use transport::{FixedUserAgent, RotatingUserAgents, UserAgentProvider};

// Re-export all model types
pub use types::{
    CardVersionInfo, ChemistryStyle, Club, Foot, FullPlayer, League, ManagerCard, Platform,
    PlayerPrice, PopularPlayer, SearchOptions, SortOrder, WorkRate,
};
