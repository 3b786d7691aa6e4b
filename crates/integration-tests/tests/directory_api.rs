//! Directory endpoints: create forms, live listing, index page and catalog.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use honest_shops_integration_tests::TestApp;

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.get("/health").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "ok");

    let response = app.get("/health/ready").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_and_list_directory() {
    let app = TestApp::new().await;
    app.seed_shop("IL", "Second+Chapter+Books", "TRUE").await;

    let response = app.get("/directory").await;
    assert_eq!(response.status, StatusCode::OK);

    let shops = response.json();
    let shops = shops.as_array().unwrap();
    assert_eq!(shops.len(), 1);

    let shop = &shops[0];
    assert_eq!(shop["name"], "Second Chapter Books");
    assert_eq!(shop["is_verified"], true);
    assert_eq!(shop["address"]["address_1"], "12 Elm St");
    assert_eq!(shop["address"]["address_2"], serde_json::Value::Null);
    assert_eq!(shop["address"]["city"], "Springfield");
    assert_eq!(shop["address"]["state"], "IL");
    assert_eq!(shop["address"]["postal_code"], 62701);
}

#[tokio::test]
async fn test_create_redirects_to_index() {
    let app = TestApp::new().await;

    let response = app.post_form("/create/state", "name=CO").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), Some("/"));

    // Trailing-slash variant
    let response = app.post_form("/create/state/", "name=WA").await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
    assert_eq!(app.last_id("state").await, 2);
}

#[tokio::test]
async fn test_lenient_verification_flag() {
    let app = TestApp::new().await;
    app.seed_shop("IL", "Yes+Shop", "yes").await;
    app.seed_shop("IL", "One+Shop", "1").await;
    app.seed_shop("IL", "Padded+Shop", "+true").await;
    app.seed_shop("IL", "Upper+Shop", "True").await;

    let shops = app.get("/directory").await.json();
    let flags: Vec<bool> = shops
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["is_verified"].as_bool().unwrap())
        .collect();

    assert_eq!(flags, vec![false, false, false, true]);
}

#[tokio::test]
async fn test_validation_error_body() {
    let app = TestApp::new().await;

    let response = app.post_form("/create/state", "name=").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].as_str().unwrap().contains("name"));

    let response = app
        .post_form(
            "/create/address",
            "address_1=1+Main+St&city=Dover&state_id=1&postal_code=ABCDE",
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unreadable_form_gets_json_error() {
    let app = TestApp::new().await;

    for uri in ["/create/state", "/create/address", "/create/shop"] {
        let response = app
            .request(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::from("name=IL"))
                    .unwrap(),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(response.json()["error"].as_str().unwrap().contains("Content-Type"));
    }
    assert_eq!(app.last_id("state").await, 0);
}

#[tokio::test]
async fn test_unknown_reference_is_a_server_fault() {
    let app = TestApp::new().await;

    let response = app
        .post_form(
            "/create/address",
            "address_1=1+Main+St&city=Dover&state_id=42&postal_code=19901",
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json()["error"], "Internal server error");

    let response = app
        .post_form("/create/shop", "name=Ghost&address_id=42&is_verified=true")
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.last_id("shop").await, 0);
}

#[tokio::test]
async fn test_directory_show() {
    let app = TestApp::new().await;
    app.seed_shop("IL", "Second+Chapter+Books", "true").await;

    let response = app.get("/directory/1").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["name"], "Second Chapter Books");

    let response = app.get("/directory/99").await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Shop not found");

    let response = app.get("/directory/abc").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_page_renders_directory() {
    let app = TestApp::new().await;
    app.seed_shop("IL", "Second+Chapter+Books", "true").await;

    let response = app.get("/").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(
        response
            .header("content-type")
            .unwrap()
            .starts_with("text/html")
    );

    let html = response.text();
    assert!(html.contains("Second Chapter Books"));
    assert!(html.contains("12 Elm St, Springfield, IL 62701"));
    assert!(html.contains(r#"action="/create/shop""#));
}

#[tokio::test]
async fn test_all_shops_serves_fixture_by_default() {
    let app = TestApp::new().await;
    app.seed_shop("IL", "Not+In+Fixture", "true").await;

    let response = app.get("/get-all-shops").await;
    assert_eq!(response.status, StatusCode::OK);

    let shops = response.json();
    let names: Vec<&str> = shops
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Second Chapter Books"));
    assert!(!names.contains(&"Not In Fixture"));
}

#[tokio::test]
async fn test_all_shops_from_store() {
    let app = TestApp::builder().live_catalog().build().await;

    assert_eq!(app.get("/get-all-shops").await.json(), serde_json::json!([]));

    app.seed_shop("IL", "Live+Shop", "false").await;
    let shops = app.get("/get-all-shops").await.json();
    assert_eq!(shops[0]["name"], "Live Shop");
}

#[tokio::test]
async fn test_request_id_and_cors_headers() {
    let app = TestApp::new().await;

    let response = app.get("/directory").await;
    assert!(response.header("x-request-id").is_some());
    assert_eq!(response.header("access-control-allow-origin"), Some("*"));
}
