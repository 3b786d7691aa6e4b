//! Contact form route handler.
//!
//! Responds with its own `{status, message}` shape rather than `AppError`'s.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;
use tracing::instrument;

use crate::services::{ContactError, ContactSubmission};
use crate::state::AppState;

/// Response for form submission.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl ContactResponse {
    const fn success() -> Self {
        Self {
            status: "success",
            message: "Form data received and email sent",
        }
    }

    const fn error(message: &'static str) -> Self {
        Self {
            status: "error",
            message,
        }
    }
}

/// Forward a contact-form submission by email.
///
/// POST /handle-contact-form
#[instrument(skip_all)]
pub async fn handle_contact_form(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> impl IntoResponse {
    let Ok(Json(form)) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ContactResponse::error("name, email and message are required")),
        );
    };

    match state.contact().submit_contact_form(&form).await {
        Ok(()) => {
            tracing::info!("Contact form forwarded");
            (StatusCode::OK, Json(ContactResponse::success()))
        }
        Err(ContactError::Validation(message)) => {
            (StatusCode::BAD_REQUEST, Json(ContactResponse::error(message)))
        }
        Err(e @ ContactError::Delivery(_)) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(error = %e, sentry_event_id = %event_id, "Failed to send contact email");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ContactResponse::error("Failed to send email")),
            )
        }
    }
}
