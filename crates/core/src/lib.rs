//! Honest Shops Core - Shared types library.
//!
//! This crate provides common types used across all Honest Shops components:
//! - `server` - Directory HTTP service
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, place identifiers
//!   and the lenient verification flag

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
