//! Honest Shops directory service library.
//!
//! Exposes the router, state and services so the binary, the CLI and the
//! integration tests share one implementation.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

pub use config::DirectoryConfig;
pub use routes::router;
pub use state::AppState;
