//! Cross-origin policy.

use tower_http::cors::{Any, CorsLayer};

/// Allow any origin, method and header on every route.
#[must_use]
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
