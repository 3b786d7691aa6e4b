//! Core types for Honest Shops.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod flag;
pub mod id;
pub mod place;

pub use email::{Email, EmailError};
pub use flag::parse_lenient_bool;
pub use id::*;
pub use place::{PlaceId, PlaceIdError};
