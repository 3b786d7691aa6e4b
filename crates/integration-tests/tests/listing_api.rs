//! Listing proxy: `/get-google-listing` against a mocked places API.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::json;

use honest_shops_integration_tests::{TEST_API_KEY, TestApp};

fn place_details() -> serde_json::Value {
    json!({
        "result": {
            "name": "Tidewater Hardware",
            "opening_hours": {
                "open_now": false,
                "weekday_text": ["Monday: 8:00 AM – 6:00 PM", "Sunday: Closed"]
            },
            "formatted_address": "301 Harbor Rd, Beaufort, NC 28516, USA",
            "formatted_phone_number": "(252) 555-0187",
            "rating": 4.8,
            "user_ratings_total": 212,
            "photos": [{"photo_reference": "abc"}]
        },
        "status": "OK"
    })
}

#[tokio::test]
async fn test_listing_is_reshaped() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/details/json")
                .query_param("place_id", "ChIJtidewater")
                .query_param("key", TEST_API_KEY);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(place_details());
        })
        .await;

    let app = TestApp::builder()
        .places_url(server.url("/details/json"))
        .build()
        .await;

    let response = app.get("/get-google-listing?placeId=ChIJtidewater").await;
    mock.assert_async().await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.json(),
        json!({
            "name": "Tidewater Hardware",
            "is_open_now": false,
            "opening_hours": ["Monday: 8:00 AM – 6:00 PM", "Sunday: Closed"],
            "formatted_address": "301 Harbor Rd, Beaufort, NC 28516, USA",
            "formatted_phone_number": "(252) 555-0187",
            "rating": 4.8
        })
    );
}

#[tokio::test]
async fn test_missing_place_id_makes_no_upstream_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/details/json");
            then.status(200).json_body(place_details());
        })
        .await;

    let app = TestApp::builder()
        .places_url(server.url("/details/json"))
        .build()
        .await;

    for uri in ["/get-google-listing", "/get-google-listing?placeId="] {
        let response = app.get(uri).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json()["error"], "placeId parameter is required");
    }
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn test_unreadable_query_gets_json_error() {
    let app = TestApp::new().await;

    let response = app.get("/get-google-listing?placeId=a&placeId=b").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.header("content-type"), Some("application/json"));
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_not_configured() {
    let app = TestApp::new().await;

    let response = app.get("/get-google-listing?placeId=ChIJtidewater").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json()["error"],
        "Google Places API key is not configured"
    );
}

#[tokio::test]
async fn test_upstream_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/details/json");
            then.status(502).body("bad gateway");
        })
        .await;

    let app = TestApp::builder()
        .places_url(server.url("/details/json"))
        .build()
        .await;

    let response = app.get("/get-google-listing?placeId=ChIJtidewater").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["error"], "Failed to fetch Google listing");
    assert!(!response.text().contains(TEST_API_KEY));
}

#[tokio::test]
async fn test_malformed_upstream_payload() {
    let server = MockServer::start_async().await;
    let mut body = place_details();
    body["result"].as_object_mut().unwrap().remove("rating");
    server
        .mock_async(move |when, then| {
            when.method(GET).path("/details/json");
            then.status(200).json_body(body);
        })
        .await;

    let app = TestApp::builder()
        .places_url(server.url("/details/json"))
        .build()
        .await;

    let response = app.get("/get-google-listing?placeId=ChIJtidewater").await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["error"], "Failed to fetch Google listing");
}
