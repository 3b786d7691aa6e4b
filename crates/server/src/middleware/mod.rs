//! HTTP middleware stack for the directory service.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. CORS (allow-all)
//! 3. `TraceLayer` (request span with method, uri, status, latency)
//! 4. Request ID (recorded into the trace span and echoed back)

pub mod cors;
pub mod request_id;

pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
