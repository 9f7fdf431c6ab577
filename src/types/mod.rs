//! Public types for the futmarket API.

mod card;
mod consumable;
mod de;
mod league;
mod platform;
mod player;
mod price;
mod search;

pub use card::CardVersionInfo;
pub use consumable::{ChemistryStyle, ManagerCard};
pub use league::{Club, League};
pub use platform::Platform;
pub use player::{FullPlayer, PopularPlayer};
pub use price::PlayerPrice;
pub use search::{Foot, SearchOptions, SortOrder, WorkRate};

pub(crate) use price::{PriceBook, RawResourcePrice};
