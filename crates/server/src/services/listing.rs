//! Place-details proxy for shop listings.
//!
//! Looks up a shop by its opaque place identifier, then reshapes the
//! upstream payload into [`FormattedListing`]. Only an allow-listed subset of
//! the upstream fields is ever forwarded.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use honest_shops_core::PlaceId;

use crate::config::PlacesConfig;
use crate::models::FormattedListing;

/// Errors that can occur while fetching listing details.
#[derive(Debug, Error)]
pub enum ListingError {
    /// The caller did not supply a place identifier.
    #[error("place identifier is required")]
    InvalidRequest,

    /// No API key is configured.
    #[error("place-details API key is not configured")]
    NotConfigured,

    /// Transport failure, non-success status or a non-JSON body.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The upstream payload is missing a required field.
    #[error("malformed upstream response: missing {0}")]
    Malformed(&'static str),
}

/// Source of raw place-details payloads.
#[async_trait]
pub trait PlaceDetailsSource: Send + Sync {
    /// Fetch the raw JSON payload for a place.
    async fn fetch_details(&self, place_id: &PlaceId) -> Result<Value, ListingError>;
}

/// Place-details client backed by reqwest.
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: reqwest::Client,
    base_url: Url,
    api_key: SecretString,
}

impl GooglePlacesClient {
    /// Create a client for the configured endpoint.
    ///
    /// Returns `Ok(None)` when no API key is configured.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn from_config(
        config: &PlacesConfig,
        timeout: Duration,
    ) -> Result<Option<Self>, ListingError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ListingError::Upstream(e.to_string()))?;

        Ok(Some(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
        }))
    }
}

#[async_trait]
impl PlaceDetailsSource for GooglePlacesClient {
    async fn fetch_details(&self, place_id: &PlaceId) -> Result<Value, ListingError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("place_id", place_id.as_str()),
                ("key", self.api_key.expose_secret()),
            ])
            .send()
            .await
            // Strip the URL, it carries the API key
            .map_err(|e| ListingError::Upstream(e.without_url().to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingError::Upstream(format!("status {}", status.as_u16())));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| ListingError::Upstream(format!("invalid body: {}", e.without_url())))
    }
}

/// Listing lookups over an optional place-details source.
#[derive(Clone)]
pub struct ListingService {
    source: Option<Arc<dyn PlaceDetailsSource>>,
}

impl ListingService {
    /// Create a listing service. `None` means lookups are not configured.
    #[must_use]
    pub fn new(source: Option<Arc<dyn PlaceDetailsSource>>) -> Self {
        Self { source }
    }

    /// Fetch and format the listing for a place.
    ///
    /// The identifier is validated before anything else; a missing or blank
    /// one never reaches the upstream API.
    ///
    /// # Errors
    ///
    /// Returns `ListingError` for a missing identifier, a missing API key,
    /// an upstream failure, or a payload lacking a required field.
    pub async fn get_listing_details(
        &self,
        place_id: Option<&str>,
    ) -> Result<FormattedListing, ListingError> {
        let place_id = PlaceId::parse(place_id).map_err(|_| ListingError::InvalidRequest)?;
        let source = self.source.as_ref().ok_or(ListingError::NotConfigured)?;

        let payload = source.fetch_details(&place_id).await?;
        format_listing(&payload)
    }
}

/// Reshape a place-details payload into a [`FormattedListing`].
///
/// # Errors
///
/// Returns `ListingError::Malformed` naming the first absent or wrongly typed
/// field.
pub fn format_listing(payload: &Value) -> Result<FormattedListing, ListingError> {
    let result = payload
        .get("result")
        .filter(|r| r.is_object())
        .ok_or(ListingError::Malformed("result"))?;

    let text = |pointer: &str, field: &'static str| {
        result
            .pointer(pointer)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or(ListingError::Malformed(field))
    };

    let opening_hours = result
        .pointer("/opening_hours/weekday_text")
        .and_then(Value::as_array)
        .and_then(|days| {
            days.iter()
                .map(|d| d.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
        })
        .ok_or(ListingError::Malformed("opening_hours.weekday_text"))?;

    Ok(FormattedListing {
        name: text("/name", "name")?,
        is_open_now: result
            .pointer("/opening_hours/open_now")
            .and_then(Value::as_bool)
            .ok_or(ListingError::Malformed("opening_hours.open_now"))?,
        opening_hours,
        formatted_address: text("/formatted_address", "formatted_address")?,
        formatted_phone_number: text("/formatted_phone_number", "formatted_phone_number")?,
        rating: result
            .pointer("/rating")
            .and_then(Value::as_f64)
            .ok_or(ListingError::Malformed("rating"))?,
    })
}
