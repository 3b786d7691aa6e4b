//! Unified error handling with Sentry integration.
//!
//! Directory and listing handlers return `Result<T, AppError>`. Server faults
//! are captured to Sentry and logged before responding; clients only ever see
//! a stable `{"error": "..."}` body.

use axum::{
    Json,
    extract::rejection::{FormRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::{DirectoryError, ListingError};

/// Application-level error type for the directory service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Directory operation failed.
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Listing lookup failed.
    #[error("Listing error: {0}")]
    Listing(#[from] ListingError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Directory(DirectoryError::Validation(_))
            | Self::Listing(ListingError::InvalidRequest)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Directory(_) | Self::Listing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> String {
        match self {
            Self::Directory(DirectoryError::Validation(msg))
            | Self::BadRequest(msg)
            | Self::NotFound(msg) => msg.clone(),
            Self::Listing(err) => listing_message(err).to_string(),
            // Don't expose internal error details to clients
            Self::Directory(_) => "Internal server error".to_string(),
        }
    }
}

fn listing_message(err: &ListingError) -> &'static str {
    match err {
        ListingError::InvalidRequest => "placeId parameter is required",
        ListingError::NotConfigured => "Google Places API key is not configured",
        ListingError::Upstream(_) | ListingError::Malformed(_) => "Failed to fetch Google listing",
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = ErrorBody {
            error: self.public_message(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::to_bytes;

    use super::*;
    use crate::db::RepositoryError;

    async fn respond(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::NotFound("Shop not found".to_string());
        assert_eq!(err.to_string(), "Not found: Shop not found");

        let err = AppError::BadRequest("invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: invalid input");
    }

    #[tokio::test]
    async fn test_validation_message_is_forwarded() {
        let err = AppError::from(DirectoryError::Validation("name is required".to_string()));
        let (status, body) = respond(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "name is required");
    }

    #[tokio::test]
    async fn test_server_faults_are_generic() {
        for err in [
            DirectoryError::Reference {
                entity: "state",
                id: 7,
            },
            DirectoryError::Integrity("shop 3 points at missing address 9".to_string()),
            DirectoryError::Repository(RepositoryError::Database(sqlx::Error::PoolTimedOut)),
        ] {
            let (status, body) = respond(AppError::from(err)).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"], "Internal server error");
        }
    }

    #[tokio::test]
    async fn test_listing_errors() {
        let (status, body) = respond(ListingError::InvalidRequest.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "placeId parameter is required");

        let (status, body) = respond(ListingError::NotConfigured.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Google Places API key is not configured");

        for err in [
            ListingError::Upstream("status 503".to_string()),
            ListingError::Malformed("rating"),
        ] {
            let (status, body) = respond(err.into()).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"], "Failed to fetch Google listing");
        }
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, body) = respond(AppError::NotFound("Shop not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Shop not found");
    }
}
