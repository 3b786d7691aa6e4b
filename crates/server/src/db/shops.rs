//! Shop repository.

use sqlx::SqlitePool;

use honest_shops_core::{AddressId, ShopId};

use super::{RepositoryError, map_insert_error};
use crate::models::Shop;

/// Repository for `shop` rows.
pub struct ShopRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ShopRepository<'a> {
    /// Create a new shop repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a shop.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if `address_id` does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        address_id: AddressId,
        is_verified: bool,
    ) -> Result<Shop, RepositoryError> {
        sqlx::query_as::<_, Shop>(
            r"
            INSERT INTO shop (name, address_id, is_verified)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, address_id, is_verified
            ",
        )
        .bind(name)
        .bind(address_id)
        .bind(is_verified)
        .fetch_one(self.pool)
        .await
        .map_err(|e| map_insert_error(e, "address"))
    }

    /// Get a shop by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ShopId) -> Result<Option<Shop>, RepositoryError> {
        let shop = sqlx::query_as::<_, Shop>(
            "SELECT id, name, address_id, is_verified FROM shop WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(shop)
    }

    /// List all shops in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Shop>, RepositoryError> {
        let shops = sqlx::query_as::<_, Shop>(
            "SELECT id, name, address_id, is_verified FROM shop ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(shops)
    }
}
