//! Listing details returned to the front-end.

use serde::{Deserialize, Serialize};

/// The allow-listed subset of a place-details payload.
///
/// Nothing else from the upstream response is forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedListing {
    pub name: String,
    pub is_open_now: bool,
    /// One human-readable line per weekday, as provided upstream.
    pub opening_hours: Vec<String>,
    pub formatted_address: String,
    pub formatted_phone_number: String,
    pub rating: f64,
}
