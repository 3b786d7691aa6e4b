//! Place identifier for the external place-details API.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PlaceId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceIdError {
    /// No identifier was supplied, or it was blank.
    #[error("place id is required")]
    Missing,
}

/// An opaque place identifier.
///
/// The only constraint is that it is non-blank; the value is otherwise passed
/// through to the upstream API untouched (after trimming).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PlaceId(String);

impl PlaceId {
    /// Parse a `PlaceId` from optional raw input (e.g. a query parameter).
    ///
    /// # Errors
    ///
    /// Returns [`PlaceIdError::Missing`] if the input is absent or blank.
    pub fn parse(raw: Option<&str>) -> Result<Self, PlaceIdError> {
        match raw.map(str::trim) {
            Some(s) if !s.is_empty() => Ok(Self(s.to_owned())),
            _ => Err(PlaceIdError::Missing),
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
