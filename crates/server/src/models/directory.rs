//! Directory domain types.
//!
//! `State`, `Address` and `Shop` mirror the stored rows one-to-one. The view
//! types are assembled on read and never stored.

use serde::{Deserialize, Serialize};

use honest_shops_core::{AddressId, ShopId, StateId};

/// A state (region) that addresses belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct State {
    pub id: StateId,
    pub name: String,
}

/// A street address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Address {
    pub id: AddressId,
    pub address_1: String,
    pub address_2: Option<String>,
    pub address_3: Option<String>,
    pub city: String,
    pub state_id: StateId,
    pub postal_code: i64,
}

/// A shop listed in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Shop {
    pub id: ShopId,
    pub name: String,
    pub address_id: AddressId,
    pub is_verified: bool,
}

/// Address with its state name resolved, as embedded in [`FullShopView`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullAddressView {
    pub id: AddressId,
    pub address_1: String,
    pub address_2: Option<String>,
    pub address_3: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: i64,
}

impl FullAddressView {
    /// Combine an address with the state it references.
    #[must_use]
    pub fn new(address: &Address, state: &State) -> Self {
        Self {
            id: address.id,
            address_1: address.address_1.clone(),
            address_2: address.address_2.clone(),
            address_3: address.address_3.clone(),
            city: address.city.clone(),
            state: state.name.clone(),
            postal_code: address.postal_code,
        }
    }
}

/// Denormalized shop: Shop + Address + State.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FullShopView {
    pub id: ShopId,
    pub name: String,
    pub address: FullAddressView,
    pub is_verified: bool,
}

/// Entry of the bundled, manually curated shop list.
///
/// Same shape as [`FullShopView`] plus the place identifier the front-end uses
/// to request live listing details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuratedShop {
    pub id: ShopId,
    pub name: String,
    pub address: FullAddressView,
    pub is_verified: bool,
    #[serde(default)]
    pub place_id: Option<String>,
}
