// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Health, configuration echo, fallback and CORS tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use axum::{routing::get, Router};
use serde_json::json;
use skin_analysis_gateway::api::apply_middleware;
use tower::util::ServiceExt;

use super::support::*;

async fn app() -> axum::Router {
    app_with(test_config(
        &closed_port_url().await,
        &closed_port_url().await,
    ))
}

#[tokio::test]
async fn test_root_reports_service() {
    let response = app().await.oneshot(get_request("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "skin-product-snack-analysis");
    assert_eq!(body["version"], "2.0.0");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health() {
    let response = app().await.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}

#[tokio::test]
async fn test_api_test_never_echoes_secrets() {
    let response = app().await.oneshot(get_request("/api/test")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["code"], 0);
    assert_eq!(body["config"]["visionModel"], "gpt-4o");
    assert_eq!(body["config"]["visionConfigured"], true);
    assert_eq!(body["config"]["skinConfigured"], true);
    assert!(body["config"]["skinApi"].as_str().unwrap().starts_with("http://127.0.0.1:"));

    let text = body.to_string();
    assert!(!text.contains(TEST_API_KEY));
    assert!(!text.contains(TEST_CLIENT_SECRET));
}

#[tokio::test]
async fn test_api_test_reports_missing_key() {
    let mut config = test_config(&closed_port_url().await, &closed_port_url().await);
    config.vision.api_key = None;
    let response = app_with(config)
        .oneshot(get_request("/api/test"))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["config"]["visionConfigured"], false);
}

#[tokio::test]
async fn test_unknown_route_returns_404_envelope() {
    let response = app()
        .await
        .oneshot(get_request("/api/does-not-exist"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "Not Found");
    assert_eq!(body["path"], "/api/does-not-exist");
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("origin", "https://client.example")
        .body(Body::empty())
        .unwrap();
    let response = app().await.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn test_wrong_method_returns_404_envelope() {
    for uri in ["/api/analyze", "/api/analysis/product", "/api/analysis/analyze-base64"] {
        let response = app().await.oneshot(get_request(uri)).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
        let body = body_json(response).await;
        assert_eq!(body, json!({"code": 404, "message": "Not Found", "path": uri}));
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app().await.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["path"], "/health");
}

async fn exploding_handler() -> &'static str {
    panic!("handler exploded")
}

#[tokio::test]
async fn test_panicking_handler_returns_500_envelope() {
    let app = apply_middleware(Router::new().route("/explode", get(exploding_handler)));

    let response = app.oneshot(get_request("/explode")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"code": -1, "message": "internal error", "error": "handler exploded"})
    );
}
