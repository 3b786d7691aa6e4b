//! Address repository.

use sqlx::SqlitePool;

use honest_shops_core::{AddressId, StateId};

use super::{RepositoryError, map_insert_error};
use crate::models::Address;

/// Validated input for a new address row.
#[derive(Debug, Clone)]
pub struct NewAddress {
    pub address_1: String,
    pub address_2: Option<String>,
    pub address_3: Option<String>,
    pub city: String,
    pub state_id: StateId,
    pub postal_code: i64,
}

/// Repository for `address` rows.
pub struct AddressRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> AddressRepository<'a> {
    /// Create a new address repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if `state_id` does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, address: &NewAddress) -> Result<Address, RepositoryError> {
        sqlx::query_as::<_, Address>(
            r"
            INSERT INTO address (address_1, address_2, address_3, city, state_id, postal_code)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            RETURNING id, address_1, address_2, address_3, city, state_id, postal_code
            ",
        )
        .bind(&address.address_1)
        .bind(&address.address_2)
        .bind(&address.address_3)
        .bind(&address.city)
        .bind(address.state_id)
        .bind(address.postal_code)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_insert_error(e, "state"))
    }

    /// Get an address by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: AddressId) -> Result<Option<Address>, RepositoryError> {
        let address = sqlx::query_as::<_, Address>(
            r"
            SELECT id, address_1, address_2, address_3, city, state_id, postal_code
            FROM address
            WHERE id = ?1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(address)
    }

    /// List all addresses in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Address>, RepositoryError> {
        let addresses = sqlx::query_as::<_, Address>(
            r"
            SELECT id, address_1, address_2, address_3, city, state_id, postal_code
            FROM address
            ORDER BY id
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(addresses)
    }
}
