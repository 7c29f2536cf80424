//! Integration tests for profile HTTP endpoints.
//!
//! These tests drive the full router (body limit, timeout, CORS and trace
//! layers included) against an in-memory store:
//! 1. CRUD endpoints return the documented status codes and bodies
//! 2. Listing order is starred first, then most recent
//! 3. The scale endpoint scores and places categories
//! 4. Malformed input is rejected with a VALIDATION_FAILED body

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use decision_scale::adapters::http::app_router;
use decision_scale::adapters::store::InMemoryProfileStore;
use decision_scale::config::ServerConfig;
use decision_scale::domain::decision::create_from_template;
use decision_scale::domain::foundation::{ProfileId, Timestamp};
use decision_scale::ports::ProfileStore;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_with(store: Arc<InMemoryProfileStore>) -> Router {
    app_router(store, &ServerConfig::default())
}

fn empty_app() -> (Router, Arc<InMemoryProfileStore>) {
    let store = Arc::new(InMemoryProfileStore::new());
    (app_with(store.clone()), store)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn send_raw(app: &Router, uri: &str, raw: &'static str) -> StatusCode {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

fn profile_body(id: &str, name: &str, last_modified: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "categories": [
            {
                "id": "c1",
                "name": "Option A",
                "pros": [{ "id": "p1", "description": "Cheap", "weight": 3 }],
                "cons": [{ "id": "n1", "description": "Slow", "weight": 1 }]
            }
        ],
        "lastModified": last_modified
    })
}

// =============================================================================
// Create & List
// =============================================================================

#[tokio::test]
async fn create_returns_201_with_stored_profile() {
    let (app, store) = empty_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/profiles",
        Some(profile_body("a", "Apartment", 100)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], "a");
    assert_eq!(body["name"], "Apartment");
    assert_eq!(body["lastModified"], 100);
    assert_eq!(body["starred"], false);
    assert_eq!(body["categories"][0]["pros"][0]["weight"], 3);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn create_without_id_generates_one() {
    let (app, _) = empty_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/profiles",
        Some(json!({ "name": "Untracked" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["id"].as_str().unwrap().is_empty());
    assert!(body["lastModified"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn list_orders_starred_first_then_most_recent() {
    let (app, _) = empty_app();

    send(&app, Method::POST, "/api/profiles", Some(profile_body("old", "Old", 10))).await;
    send(&app, Method::POST, "/api/profiles", Some(profile_body("new", "New", 30))).await;
    let mut starred = profile_body("star", "Star", 5);
    starred["starred"] = json!(true);
    send(&app, Method::POST, "/api/profiles", Some(starred)).await;

    let (status, body) = send(&app, Method::GET, "/api/profiles", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["star", "new", "old"]);
}

#[tokio::test]
async fn duplicate_create_returns_409() {
    let (app, _) = empty_app();
    send(&app, Method::POST, "/api/profiles", Some(profile_body("a", "First", 1))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/profiles",
        Some(profile_body("a", "Second", 2)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "CONFLICT");
}

// =============================================================================
// Get, Update & Delete
// =============================================================================

#[tokio::test]
async fn get_unknown_profile_returns_404() {
    let (app, _) = empty_app();

    let (status, body) = send(&app, Method::GET, "/api/profiles/missing", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "PROFILE_NOT_FOUND");
}

#[tokio::test]
async fn put_updates_only_fields_present() {
    let (app, _) = empty_app();
    send(&app, Method::POST, "/api/profiles", Some(profile_body("a", "Before", 1))).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/profiles/a",
        Some(json!({ "name": "After", "starred": true })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "After");
    assert_eq!(body["starred"], true);
    assert_eq!(body["lastModified"], 1);
    assert_eq!(body["categories"][0]["name"], "Option A");

    let (_, fetched) = send(&app, Method::GET, "/api/profiles/a", None).await;
    assert_eq!(fetched, body);
}

#[tokio::test]
async fn put_unknown_profile_returns_404() {
    let (app, store) = empty_app();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/profiles/ghost",
        Some(json!({ "name": "Nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn delete_returns_message_then_404() {
    let (app, _) = empty_app();
    send(&app, Method::POST, "/api/profiles", Some(profile_body("a", "Doomed", 1))).await;

    let (status, body) = send(&app, Method::DELETE, "/api/profiles/a", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Profile deleted successfully" }));

    let (status, _) = send(&app, Method::DELETE, "/api/profiles/a", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Scale & Templates
// =============================================================================

#[tokio::test]
async fn scale_endpoint_scores_job_template() {
    let store = Arc::new(InMemoryProfileStore::new());
    let profile = create_from_template("job", Timestamp::from_millis(1));
    let id: ProfileId = profile.id.clone();
    store.create(&profile).await.unwrap();
    let app = app_with(store);

    let (status, body) = send(&app, Method::GET, &format!("/api/profiles/{}/scale", id), None).await;

    assert_eq!(status, StatusCode::OK);
    let scores: Vec<i64> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["score"].as_i64().unwrap())
        .collect();
    assert_eq!(scores, vec![4, 7]);
    assert_eq!(body["categories"][0]["totalPros"], 15);
    assert_eq!(body["categories"][0]["totalCons"], 11);

    assert_eq!(body["scale"]["rangeLimit"], 10);
    let ticks: Vec<i64> = body["scale"]["ticks"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["value"].as_i64().unwrap())
        .collect();
    assert_eq!(ticks, vec![-8, -6, -4, -2, 2, 4, 6, 8]);

    let markers = body["scale"]["markers"].as_array().unwrap();
    assert_eq!(markers.len(), 2);
    assert_eq!(markers[0]["label"], "Tech Corp");
    assert_eq!(markers[0]["polarity"], "positive");
    assert!((markers[0]["position"].as_f64().unwrap() - 0.3).abs() < 1e-9);
}

#[tokio::test]
async fn scale_of_unknown_profile_returns_404() {
    let (app, _) = empty_app();

    let (status, _) = send(&app, Method::GET, "/api/profiles/nope/scale", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn templates_lists_catalog() {
    let (app, _) = empty_app();

    let (status, body) = send(&app, Method::GET, "/api/templates", None).await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["job", "food", "life", "house", "education", "tech"]);
}

// =============================================================================
// Validation
// =============================================================================

#[tokio::test]
async fn malformed_json_returns_400() {
    let (app, store) = empty_app();

    let status = send_raw(&app, "/api/profiles", "{\"id\": \"a\",").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn negative_weight_returns_400() {
    let (app, store) = empty_app();
    let mut body = profile_body("a", "Bad", 1);
    body["categories"][0]["pros"][0]["weight"] = json!(-2);

    let (status, response) = send(&app, Method::POST, "/api/profiles", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_FAILED");
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn duplicate_factor_ids_return_400() {
    let (app, store) = empty_app();
    let mut body = profile_body("a", "Dupes", 1);
    body["categories"][0]["cons"][0]["id"] = json!("p1");

    let (status, response) = send(&app, Method::POST, "/api/profiles", Some(body)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(response["code"], "VALIDATION_FAILED");
    assert!(store.is_empty().await);
}
