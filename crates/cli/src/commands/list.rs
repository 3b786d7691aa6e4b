//! Print the directory.

use secrecy::SecretString;

use honest_shops_server::db;
use honest_shops_server::services::DirectoryService;

/// Print every shop, with its address and state, as pretty JSON.
///
/// # Errors
///
/// Returns an error if the database cannot be read or holds broken links.
pub async fn run(database_url: &SecretString) -> Result<(), Box<dyn std::error::Error>> {
    let pool = db::create_pool(database_url).await?;
    let directory = DirectoryService::new(pool);

    let shops = directory.list_directory().await?;
    tracing::info!(count = shops.len(), "Loaded directory");

    #[allow(clippy::print_stdout)]
    {
        println!("{}", serde_json::to_string_pretty(&shops)?);
    }
    Ok(())
}
