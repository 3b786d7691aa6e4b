//! Database migration command.
//!
//! Applies the migrations embedded in `honest-shops-server`. The server also
//! applies them at startup, so this is for preparing a database ahead of time.

use secrecy::SecretString;
use tracing::info;

use honest_shops_server::db;

/// Run all pending migrations.
///
/// # Errors
///
/// Returns an error if the database cannot be opened or a migration fails.
pub async fn run(database_url: &SecretString) -> Result<(), Box<dyn std::error::Error>> {
    info!("Connecting to directory database...");
    let pool = db::create_pool(database_url).await?;

    info!("Running directory migrations...");
    db::migrate(&pool).await?;

    info!("Directory migrations complete!");
    Ok(())
}
