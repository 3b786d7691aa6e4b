//! State repository.

use sqlx::SqlitePool;

use honest_shops_core::StateId;

use super::RepositoryError;
use crate::models::State;

/// Repository for `state` rows.
pub struct StateRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> StateRepository<'a> {
    /// Create a new state repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a state.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, name: &str) -> Result<State, RepositoryError> {
        let state = sqlx::query_as::<_, State>(
            r"
            INSERT INTO state (name)
            VALUES (?1)
            RETURNING id, name
            ",
        )
        .bind(name)
        .fetch_one(self.pool)
        .await?;

        Ok(state)
    }

    /// Get a state by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: StateId) -> Result<Option<State>, RepositoryError> {
        let state = sqlx::query_as::<_, State>("SELECT id, name FROM state WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        Ok(state)
    }

    /// List all states in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<State>, RepositoryError> {
        let states = sqlx::query_as::<_, State>("SELECT id, name FROM state ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(states)
    }
}
