//! Integration tests for the validate route and service plumbing.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use subreddit_scraper::config::Config;
use subreddit_scraper::web::{create_app, AppState};
use tower::ServiceExt;

fn create_test_app() -> Router {
    create_app(AppState {
        config: Arc::new(Config::for_testing()),
    })
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn test_validate_url_input() {
    let app = create_test_app();
    let (status, body) = post_json(
        app,
        "/api/validate",
        json!({"input": "https://www.reddit.com/r/rust/"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], json!(true));
    assert_eq!(body["subreddit"], "rust");
    assert_eq!(body["input_type"], "url");
}

#[tokio::test]
async fn test_validate_bare_name_input() {
    let app = create_test_app();
    let (status, body) = post_json(app, "/api/validate", json!({"input": "rust"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], json!(true));
    assert_eq!(body["subreddit"], "rust");
    assert_eq!(body["input_type"], "name");
}

#[tokio::test]
async fn test_validate_r_prefixed_input_counts_as_url() {
    let app = create_test_app();
    let (_, body) = post_json(app, "/api/validate", json!({"input": "r/rust"})).await;

    assert_eq!(body["valid"], json!(true));
    assert_eq!(body["subreddit"], "rust");
    assert_eq!(body["input_type"], "url");
}

#[tokio::test]
async fn test_validate_missing_input() {
    let app = create_test_app();
    let (status, body) = post_json(app, "/api/validate", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["valid"], json!(false));
    assert_eq!(body["error"], "Missing input parameter");
}

#[tokio::test]
async fn test_validate_empty_input() {
    let app = create_test_app();
    let (status, body) = post_json(app, "/api/validate", json!({"input": "  "})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], json!(false));
    assert_eq!(body["error"], "Input cannot be empty");
}

#[tokio::test]
async fn test_validate_unextractable_input() {
    let app = create_test_app();
    let (status, body) = post_json(
        app,
        "/api/validate",
        json!({"input": "example.com/not-reddit"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], json!(false));
    assert_eq!(body["error"], "Could not extract subreddit name from input");
}

#[tokio::test]
async fn test_healthz() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_validate_without_content_type_is_rejected() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/validate")
                .body(Body::from(json!({"input": "rust"}).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}
