//! Directory service: create and list states, addresses and shops.
//!
//! Input arrives as raw form strings. This module owns validation and the
//! composition of [`FullShopView`]s; the repositories only see typed values.

use std::collections::HashMap;

use serde::Deserialize;
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::instrument;

use honest_shops_core::{AddressId, ShopId, StateId, parse_lenient_bool};

use crate::db::addresses::NewAddress;
use crate::db::{AddressRepository, RepositoryError, ShopRepository, StateRepository};
use crate::models::{Address, FullAddressView, FullShopView, Shop, State};

const MAX_STATE_NAME_LEN: usize = 25;
const MAX_ADDRESS_LINE_LEN: usize = 100;
const MAX_SHOP_NAME_LEN: usize = 200;

/// Errors returned by directory operations.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Missing or malformed input.
    #[error("{0}")]
    Validation(String),

    /// A foreign key on the new row does not resolve.
    #[error("{entity} {id} does not exist")]
    Reference { entity: &'static str, id: i64 },

    /// A stored row points at a row that does not exist.
    #[error("integrity violation: {0}")]
    Integrity(String),

    /// Underlying store failure.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Raw address form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressInput {
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub address_3: Option<String>,
    pub city: Option<String>,
    pub state_id: Option<String>,
    pub postal_code: Option<String>,
}

/// Raw shop form input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShopInput {
    pub name: Option<String>,
    pub address_id: Option<String>,
    pub is_verified: Option<String>,
}

/// Directory operations over the entity store.
#[derive(Clone)]
pub struct DirectoryService {
    pool: SqlitePool,
}

impl DirectoryService {
    /// Create a directory service backed by `pool`.
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a state.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Validation` if the name is missing, blank or too long.
    #[instrument(skip(self))]
    pub async fn create_state(&self, name: Option<&str>) -> Result<State, DirectoryError> {
        let name = required("name", name, MAX_STATE_NAME_LEN)?;
        let state = StateRepository::new(&self.pool).create(name).await?;

        tracing::info!(state_id = %state.id, "State created");
        Ok(state)
    }

    /// Create an address under an existing state.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Validation` for missing fields or a non-integer
    /// `state_id`/`postal_code`, and `DirectoryError::Reference` if the state
    /// does not exist.
    #[instrument(skip(self, input))]
    pub async fn create_address(&self, input: &AddressInput) -> Result<Address, DirectoryError> {
        let address_1 = required("address_1", input.address_1.as_deref(), MAX_ADDRESS_LINE_LEN)?;
        let address_2 = optional("address_2", input.address_2.as_deref(), MAX_ADDRESS_LINE_LEN)?;
        let address_3 = optional("address_3", input.address_3.as_deref(), MAX_ADDRESS_LINE_LEN)?;
        let city = required("city", input.city.as_deref(), MAX_ADDRESS_LINE_LEN)?;
        let state_id: StateId = parse_integer("state_id", input.state_id.as_deref())?;
        let postal_code: i64 = parse_integer("postal_code", input.postal_code.as_deref())?;

        if StateRepository::new(&self.pool)
            .get_by_id(state_id)
            .await?
            .is_none()
        {
            return Err(DirectoryError::Reference {
                entity: "state",
                id: state_id.as_i64(),
            });
        }

        let new_address = NewAddress {
            address_1: address_1.to_owned(),
            address_2: address_2.map(str::to_owned),
            address_3: address_3.map(str::to_owned),
            city: city.to_owned(),
            state_id,
            postal_code,
        };

        let address = AddressRepository::new(&self.pool)
            .create(&new_address)
            .await
            .map_err(|e| reference_or(e, "state", state_id.as_i64()))?;

        tracing::info!(address_id = %address.id, state_id = %state_id, "Address created");
        Ok(address)
    }

    /// Create a shop at an existing address.
    ///
    /// `is_verified` uses lenient coercion: only a case-insensitive `"true"`
    /// is true, anything else (including a missing value) is false.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Validation` for a missing name or non-integer
    /// `address_id`, and `DirectoryError::Reference` if the address does not exist.
    #[instrument(skip(self, input))]
    pub async fn create_shop(&self, input: &ShopInput) -> Result<Shop, DirectoryError> {
        let name = required("name", input.name.as_deref(), MAX_SHOP_NAME_LEN)?;
        let address_id: AddressId = parse_integer("address_id", input.address_id.as_deref())?;
        let is_verified = input.is_verified.as_deref().is_some_and(parse_lenient_bool);

        if AddressRepository::new(&self.pool)
            .get_by_id(address_id)
            .await?
            .is_none()
        {
            return Err(DirectoryError::Reference {
                entity: "address",
                id: address_id.as_i64(),
            });
        }

        let shop = ShopRepository::new(&self.pool)
            .create(name, address_id, is_verified)
            .await
            .map_err(|e| reference_or(e, "address", address_id.as_i64()))?;

        tracing::info!(shop_id = %shop.id, address_id = %address_id, is_verified, "Shop created");
        Ok(shop)
    }

    /// List every shop with its address and state resolved, in shop insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Integrity` if any shop's address, or any
    /// address's state, is missing. Rows are never silently dropped.
    #[instrument(skip(self))]
    pub async fn list_directory(&self) -> Result<Vec<FullShopView>, DirectoryError> {
        let shops = ShopRepository::new(&self.pool).list().await?;
        let addresses: HashMap<AddressId, Address> = AddressRepository::new(&self.pool)
            .list()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        let states: HashMap<StateId, State> = StateRepository::new(&self.pool)
            .list()
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        let views = shops
            .into_iter()
            .map(|shop| -> Result<FullShopView, DirectoryError> {
                let address = addresses
                    .get(&shop.address_id)
                    .ok_or_else(|| missing_address(&shop))?;
                let state = states
                    .get(&address.state_id)
                    .ok_or_else(|| missing_state(address))?;
                Ok(compose(shop, address, state))
            })
            .collect::<Result<Vec<_>, DirectoryError>>()?;

        tracing::debug!(count = views.len(), "Directory listed");
        Ok(views)
    }

    /// Resolve a single shop into its full view.
    ///
    /// Returns `Ok(None)` if no shop has this ID.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Integrity` if the shop's address or state is missing.
    #[instrument(skip(self))]
    pub async fn get_shop_view(&self, id: ShopId) -> Result<Option<FullShopView>, DirectoryError> {
        let Some(shop) = ShopRepository::new(&self.pool).get_by_id(id).await? else {
            return Ok(None);
        };
        let address = AddressRepository::new(&self.pool)
            .get_by_id(shop.address_id)
            .await?
            .ok_or_else(|| missing_address(&shop))?;
        let state = StateRepository::new(&self.pool)
            .get_by_id(address.state_id)
            .await?
            .ok_or_else(|| missing_state(&address))?;

        Ok(Some(compose(shop, &address, &state)))
    }

    /// List all states in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Repository` if the query fails.
    pub async fn list_states(&self) -> Result<Vec<State>, DirectoryError> {
        Ok(StateRepository::new(&self.pool).list().await?)
    }

    /// List all addresses in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError::Repository` if the query fails.
    pub async fn list_addresses(&self) -> Result<Vec<Address>, DirectoryError> {
        Ok(AddressRepository::new(&self.pool).list().await?)
    }
}

fn compose(shop: Shop, address: &Address, state: &State) -> FullShopView {
    FullShopView {
        id: shop.id,
        name: shop.name,
        address: FullAddressView::new(address, state),
        is_verified: shop.is_verified,
    }
}

fn missing_address(shop: &Shop) -> DirectoryError {
    DirectoryError::Integrity(format!(
        "shop {} references missing address {}",
        shop.id, shop.address_id
    ))
}

fn missing_state(address: &Address) -> DirectoryError {
    DirectoryError::Integrity(format!(
        "address {} references missing state {}",
        address.id, address.state_id
    ))
}

/// The existence check and the insert are separate statements; a foreign-key
/// failure on insert is still reported as a reference error.
fn reference_or(err: RepositoryError, entity: &'static str, id: i64) -> DirectoryError {
    match err {
        RepositoryError::MissingReference(_) => DirectoryError::Reference { entity, id },
        other => DirectoryError::Repository(other),
    }
}

fn required<'a>(
    field: &str,
    value: Option<&'a str>,
    max_len: usize,
) -> Result<&'a str, DirectoryError> {
    optional(field, value, max_len)?
        .ok_or_else(|| DirectoryError::Validation(format!("{field} is required")))
}

/// Blank values count as absent. Anything else is kept as submitted.
fn optional<'a>(
    field: &str,
    value: Option<&'a str>,
    max_len: usize,
) -> Result<Option<&'a str>, DirectoryError> {
    let Some(value) = value.filter(|v| !v.trim().is_empty()) else {
        return Ok(None);
    };
    if value.chars().count() > max_len {
        return Err(DirectoryError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(Some(value))
}

fn parse_integer<T: std::str::FromStr>(
    field: &str,
    value: Option<&str>,
) -> Result<T, DirectoryError> {
    let raw = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DirectoryError::Validation(format!("{field} is required")))?;
    raw.parse()
        .map_err(|_| DirectoryError::Validation(format!("{field} must be an integer")))
}
