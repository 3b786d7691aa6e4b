//! Public shop list.
//!
//! Serves either the curated fixture or the live directory, chosen once at
//! startup.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use super::directory::{DirectoryError, DirectoryService};
use crate::config::{ShopListConfig, ShopListSource};
use crate::models::{CuratedShop, FullShopView};

/// Curated list compiled into the binary.
const BUNDLED_FIXTURE: &str = include_str!("../../data/all_shops.json");

/// Errors that can occur while loading the curated list.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read shop fixture {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("shop fixture is not a list of shops: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The shop list in whichever shape its source produces.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ShopList {
    Curated(Vec<CuratedShop>),
    Live(Vec<FullShopView>),
}

impl ShopList {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Curated(shops) => shops.len(),
            Self::Live(shops) => shops.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Clone)]
enum Source {
    Fixture(Arc<[CuratedShop]>),
    Store(DirectoryService),
}

/// Backs the "get all shops" endpoint.
#[derive(Clone)]
pub struct ShopCatalog {
    source: Source,
}

impl ShopCatalog {
    /// Catalog over an already loaded curated list.
    #[must_use]
    pub fn fixture(shops: Vec<CuratedShop>) -> Self {
        Self {
            source: Source::Fixture(shops.into()),
        }
    }

    /// Catalog over the live directory.
    #[must_use]
    pub const fn store(directory: DirectoryService) -> Self {
        Self {
            source: Source::Store(directory),
        }
    }

    /// Build the catalog the configuration asks for.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the fixture cannot be read or parsed.
    pub async fn from_config(
        config: &ShopListConfig,
        directory: DirectoryService,
    ) -> Result<Self, CatalogError> {
        match config.source {
            ShopListSource::Store => Ok(Self::store(directory)),
            ShopListSource::Fixture => {
                let shops = match &config.fixture_path {
                    Some(path) => load_fixture(path).await?,
                    None => bundled_fixture()?,
                };
                tracing::info!(count = shops.len(), "Loaded curated shop list");
                Ok(Self::fixture(shops))
            }
        }
    }

    /// List every shop from the configured source.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryError` if the live directory cannot be read.
    pub async fn list_shops(&self) -> Result<ShopList, DirectoryError> {
        match &self.source {
            Source::Fixture(shops) => Ok(ShopList::Curated(shops.to_vec())),
            Source::Store(directory) => Ok(ShopList::Live(directory.list_directory().await?)),
        }
    }
}

/// Parse the curated list bundled with the binary.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the bundled file is not a list of shops.
pub fn bundled_fixture() -> Result<Vec<CuratedShop>, CatalogError> {
    Ok(serde_json::from_str(BUNDLED_FIXTURE)?)
}

/// Read a curated list from disk.
///
/// # Errors
///
/// Returns `CatalogError` if the file cannot be read or is not a list of shops.
pub async fn load_fixture(path: &Path) -> Result<Vec<CuratedShop>, CatalogError> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
    Ok(serde_json::from_str(&contents)?)
}
