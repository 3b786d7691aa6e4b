//! Contact form: `/handle-contact-form` with in-memory mail transports.

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::json;

use honest_shops_integration_tests::{MailSetup, TEST_RECIPIENT, TestApp};

#[tokio::test]
async fn test_submission_is_mailed() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/handle-contact-form",
            &json!({
                "name": "Ada",
                "email": "ada@example.org",
                "message": "Please add my bakery."
            }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({"status": "success", "message": "Form data received and email sent"})
    );

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to.as_str(), TEST_RECIPIENT);
    assert_eq!(sent[0].subject, "New Contact Form Submission");
    assert_eq!(
        sent[0].body,
        "Name: Ada\nEmail: ada@example.org\n\nMessage:\nPlease add my bakery."
    );
    assert_eq!(sent[0].reply_to.as_ref().unwrap().as_str(), "ada@example.org");
}

#[tokio::test]
async fn test_missing_fields() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/handle-contact-form", &json!({"name": "Ada", "message": "hi"}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({"status": "error", "message": "name, email and message are required"})
    );
    assert!(app.mailer.sent().is_empty());
}

#[tokio::test]
async fn test_invalid_email() {
    let app = TestApp::new().await;

    let response = app
        .post_json(
            "/handle-contact-form",
            &json!({"name": "Ada", "email": "ada-at-example", "message": "hi"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "A valid email address is required");
}

#[tokio::test]
async fn test_malformed_body() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Request::builder()
                .method("POST")
                .uri("/handle-contact-form")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["status"], "error");
}

#[tokio::test]
async fn test_transport_failure() {
    let app = TestApp::builder().mail(MailSetup::Failing).build().await;

    let response = app
        .post_json(
            "/handle-contact-form",
            &json!({"name": "Ada", "email": "ada@example.org", "message": "hi"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json(),
        json!({"status": "error", "message": "Failed to send email"})
    );
}

#[tokio::test]
async fn test_mail_not_configured() {
    let app = TestApp::builder().mail(MailSetup::Disabled).build().await;

    let response = app
        .post_json(
            "/handle-contact-form",
            &json!({"name": "Ada", "email": "ada@example.org", "message": "hi"}),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["message"], "Failed to send email");
}
