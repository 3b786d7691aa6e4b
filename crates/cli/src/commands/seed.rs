//! Seed the directory from a YAML file.
//!
//! Rows go through the directory service, so seeded data is validated exactly
//! like form submissions.
//!
//! # File format
//!
//! ```yaml
//! states:
//!   - IL
//! addresses:
//!   - address_1: 12 Elm St
//!     city: Springfield
//!     state: IL          # state name, from `states` or already stored
//!     postal_code: 62701
//! shops:
//!   - name: Second Chapter Books
//!     address: 0         # position in `addresses`
//!     is_verified: true
//! ```

use std::collections::HashMap;
use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use honest_shops_server::db;
use honest_shops_server::services::{AddressInput, DirectoryError, DirectoryService, ShopInput};

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("address {index} references unknown state '{state}'")]
    UnknownState { index: usize, state: String },

    #[error("shop '{shop}' references address #{address}, but the file has {count}")]
    AddressOutOfRange {
        shop: String,
        address: usize,
        count: usize,
    },

    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

/// Parsed seed file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedFile {
    #[serde(default)]
    pub states: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<SeedAddress>,
    #[serde(default)]
    pub shops: Vec<SeedShop>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedAddress {
    pub address_1: String,
    pub address_2: Option<String>,
    pub address_3: Option<String>,
    pub city: String,
    pub state: String,
    pub postal_code: u32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedShop {
    pub name: String,
    pub address: usize,
    #[serde(default)]
    pub is_verified: bool,
}

/// Counts of inserted rows.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub states: usize,
    pub addresses: usize,
    pub shops: usize,
}

/// Seed the directory from `file_path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, the database cannot
/// be opened, or a row is rejected.
pub async fn run(
    database_url: &SecretString,
    file_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading seed file");

    // Parse before connecting to the database
    let content = tokio::fs::read_to_string(path).await?;
    let seed: SeedFile = serde_yaml::from_str(&content)?;

    let pool = db::create_pool(database_url).await?;
    db::migrate(&pool).await?;
    info!("Connected to database");

    let summary = seed_directory(&DirectoryService::new(pool), &seed).await?;

    info!("Seeding complete!");
    info!("  States inserted: {}", summary.states);
    info!("  Addresses inserted: {}", summary.addresses);
    info!("  Shops inserted: {}", summary.shops);

    Ok(())
}

/// Insert everything in `seed`, in file order.
///
/// Addresses may also reference states that were stored before this run.
/// Inserts are not transactional: rows created before a failure remain.
///
/// # Errors
///
/// Returns `SeedError` on the first unresolvable reference or rejected row.
pub async fn seed_directory(
    directory: &DirectoryService,
    seed: &SeedFile,
) -> Result<SeedSummary, SeedError> {
    let mut state_ids: HashMap<String, String> = directory
        .list_states()
        .await?
        .into_iter()
        .map(|s| (s.name, s.id.to_string()))
        .collect();

    for name in &seed.states {
        let state = directory.create_state(Some(name.as_str())).await?;
        state_ids.insert(state.name, state.id.to_string());
    }

    let mut address_ids = Vec::with_capacity(seed.addresses.len());
    for (index, address) in seed.addresses.iter().enumerate() {
        let state_id =
            state_ids
                .get(&address.state)
                .ok_or_else(|| SeedError::UnknownState {
                    index,
                    state: address.state.clone(),
                })?;

        let created = directory
            .create_address(&AddressInput {
                address_1: Some(address.address_1.clone()),
                address_2: address.address_2.clone(),
                address_3: address.address_3.clone(),
                city: Some(address.city.clone()),
                state_id: Some(state_id.clone()),
                postal_code: Some(address.postal_code.to_string()),
            })
            .await?;
        address_ids.push(created.id.to_string());
    }

    for shop in &seed.shops {
        let address_id =
            address_ids
                .get(shop.address)
                .ok_or_else(|| SeedError::AddressOutOfRange {
                    shop: shop.name.clone(),
                    address: shop.address,
                    count: address_ids.len(),
                })?;

        directory
            .create_shop(&ShopInput {
                name: Some(shop.name.clone()),
                address_id: Some(address_id.clone()),
                is_verified: Some(shop.is_verified.to_string()),
            })
            .await?;
    }

    Ok(SeedSummary {
        states: seed.states.len(),
        addresses: address_ids.len(),
        shops: seed.shops.len(),
    })
}
