//! HTTP route handlers for the directory service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - HTML directory index
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Directory (form posts, 303 back to /)
//! POST /create/state           - Create a state
//! POST /create/address         - Create an address
//! POST /create/shop            - Create a shop
//! GET  /directory              - Live directory as JSON
//! GET  /directory/{id}         - One shop as JSON
//!
//! # Public API
//! GET  /get-all-shops          - Curated (or live) shop list
//! GET  /get-google-listing     - Listing details by ?placeId=
//! POST /handle-contact-form    - Forward a contact message
//! ```

pub mod contact;
pub mod directory;
pub mod health;
pub mod home;
pub mod listing;

use axum::{
    Router,
    http::{Request, Response},
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{cors_layer, request_id_middleware};
use crate::state::AppState;

/// Create the directory routes router.
///
/// The create endpoints also answer on their trailing-slash paths.
pub fn directory_routes() -> Router<AppState> {
    Router::new()
        .route("/create/state", post(directory::create_state))
        .route("/create/state/", post(directory::create_state))
        .route("/create/address", post(directory::create_address))
        .route("/create/address/", post(directory::create_address))
        .route("/create/shop", post(directory::create_shop))
        .route("/create/shop/", post(directory::create_shop))
        .route("/directory", get(directory::list))
        .route("/directory/{id}", get(directory::show))
}

/// Create the public API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/get-all-shops", get(directory::all_shops))
        .route("/get-google-listing", get(listing::google_listing))
        .route("/handle-contact-form", post(contact::handle_contact_form))
}

/// Create all routes with the middleware stack applied.
///
/// Sentry layers are left to the binary so tests run without a client.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(directory_routes())
        .merge(api_routes())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &Response<_>, latency: std::time::Duration, span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .layer(cors_layer())
        .with_state(state)
}
