//! Listing route handler.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::models::FormattedListing;
use crate::state::AppState;

/// Query parameters for listing lookups.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    #[serde(rename = "placeId")]
    pub place_id: Option<String>,
}

/// Fetch formatted listing details for a place.
///
/// GET /get-google-listing?placeId=<id>
#[instrument(skip(state))]
pub async fn google_listing(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListingQuery>, QueryRejection>,
) -> Result<Json<FormattedListing>> {
    let Query(query) = query?;
    let listing = state
        .listing()
        .get_listing_details(query.place_id.as_deref())
        .await?;
    Ok(Json(listing))
}
