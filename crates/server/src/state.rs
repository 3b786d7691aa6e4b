//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::DirectoryConfig;
use crate::services::{
    CatalogError, ContactNotifier, DirectoryService, GooglePlacesClient, ListingError,
    ListingService, MailError, MailTransport, PlaceDetailsSource, ShopCatalog, SmtpMailer,
};

/// Error wiring collaborators from configuration.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("shop catalog: {0}")]
    Catalog(#[from] CatalogError),
    #[error("places client: {0}")]
    Listing(#[from] ListingError),
    #[error("mailer: {0}")]
    Mail(#[from] MailError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Every collaborator is built
/// once at startup and is immutable afterwards.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: SqlitePool,
    directory: DirectoryService,
    catalog: ShopCatalog,
    listing: ListingService,
    contact: ContactNotifier,
}

impl AppState {
    /// Assemble state from already built collaborators.
    #[must_use]
    pub fn new(
        pool: SqlitePool,
        catalog: ShopCatalog,
        listing: ListingService,
        contact: ContactNotifier,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                directory: DirectoryService::new(pool.clone()),
                pool,
                catalog,
                listing,
                contact,
            }),
        }
    }

    /// Build the production collaborators described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the curated shop list cannot be loaded or an
    /// outbound client cannot be constructed.
    pub async fn from_config(config: &DirectoryConfig, pool: SqlitePool) -> Result<Self, StateError> {
        let directory = DirectoryService::new(pool.clone());
        let catalog = ShopCatalog::from_config(&config.shop_list, directory).await?;

        let places = GooglePlacesClient::from_config(&config.places, config.outbound_timeout)?
            .map(|client| Arc::new(client) as Arc<dyn PlaceDetailsSource>);
        if places.is_none() {
            tracing::warn!("GOOGLE_PLACES_API_KEY not set, listing lookups will fail");
        }

        let contact = match &config.email {
            Some(email) => {
                let mailer: Arc<dyn MailTransport> =
                    Arc::new(SmtpMailer::new(email, config.outbound_timeout)?);
                ContactNotifier::new(Some(mailer), Some(email.recipient.clone()))
            }
            None => {
                tracing::warn!("Contact mail not configured, submissions will fail");
                ContactNotifier::new(None, None)
            }
        };

        Ok(Self::new(pool, catalog, ListingService::new(places), contact))
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the directory service.
    #[must_use]
    pub fn directory(&self) -> &DirectoryService {
        &self.inner.directory
    }

    /// Get a reference to the public shop catalog.
    #[must_use]
    pub fn catalog(&self) -> &ShopCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the listing service.
    #[must_use]
    pub fn listing(&self) -> &ListingService {
        &self.inner.listing
    }

    /// Get a reference to the contact notifier.
    #[must_use]
    pub fn contact(&self) -> &ContactNotifier {
        &self.inner.contact
    }
}
