//! Domain models for the directory service.

pub mod directory;
pub mod listing;

pub use directory::{Address, CuratedShop, FullAddressView, FullShopView, Shop, State};
pub use listing::FormattedListing;
