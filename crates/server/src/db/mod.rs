//! Database operations for the directory `SQLite` store.
//!
//! # Database: single local file (default `database.db`)
//!
//! ## Tables
//!
//! - `state` - States that addresses belong to
//! - `address` - Street addresses (`state_id` -> `state.id`)
//! - `shop` - Shops (`address_id` -> `address.id`)
//!
//! Rows are insert-only. Foreign keys are enforced on every connection.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/`, embedded into the
//! binary, and run at server startup or via:
//! ```bash
//! cargo run -p honest-shops-cli -- migrate
//! ```

pub mod addresses;
pub mod shops;
pub mod states;

use std::str::FromStr;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use addresses::AddressRepository;
pub use shops::ShopRepository;
pub use states::StateRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An insert referenced a row that does not exist.
    #[error("referenced {0} does not exist")]
    MissingReference(&'static str),
}

/// Map an insert failure, turning a foreign-key violation into
/// [`RepositoryError::MissingReference`] for the named parent entity.
fn map_insert_error(err: sqlx::Error, parent: &'static str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::MissingReference(parent);
    }
    RepositoryError::Database(err)
}

/// Create a `SQLite` connection pool.
///
/// The database file is created if missing and foreign keys are enforced.
/// In-memory URLs get a single connection that is never recycled, since every
/// new connection would otherwise see its own empty database.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the database cannot be opened.
pub async fn create_pool(database_url: &SecretString) -> Result<SqlitePool, sqlx::Error> {
    let url = database_url.expose_secret();
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool_options = if is_in_memory(url) {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
    };

    pool_options.connect_with(options).await
}

/// Run the embedded migrations.
///
/// # Errors
///
/// Returns `MigrateError` if a migration fails or the history is inconsistent.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
