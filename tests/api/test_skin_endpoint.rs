// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Skin analysis endpoint tests for POST /api/analyze

use axum::http::StatusCode;
use serde_json::json;
use tower::util::ServiceExt;

use super::support::*;

#[tokio::test]
async fn test_skin_analysis_passes_provider_reply_through() {
    let provider_reply = json!({
        "code": 0,
        "message": "success",
        "data": {"acne": {"count": 3, "level": 1}}
    });
    let skin = spawn_skin_upstream(StatusCode::OK, provider_reply.clone()).await;
    let app = app_with(test_config(&closed_port_url().await, &skin.base_url));

    let response = app
        .oneshot(multipart_request("/api/analyze", "image", &tiny_png(), "image/png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, provider_reply);

    assert_eq!(skin.recorder.hits(), 1);
    // base64("test-client:test-client-secret")
    assert_eq!(
        skin.recorder.authorization().as_deref(),
        Some("Basic dGVzdC1jbGllbnQ6dGVzdC1jbGllbnQtc2VjcmV0")
    );
    assert_eq!(
        skin.recorder.path_param.lock().unwrap().as_deref(),
        Some("65536")
    );
    assert_eq!(
        *skin.recorder.image_field_len.lock().unwrap(),
        Some(tiny_png().len())
    );
}

#[tokio::test]
async fn test_custom_detect_types() {
    let skin = spawn_skin_upstream(StatusCode::OK, json!({"code": 0, "message": "ok"})).await;
    let mut config = test_config(&closed_port_url().await, &skin.base_url);
    config.skin.detect_types = "1024".to_string();
    let app = app_with(config);

    let response = app
        .oneshot(multipart_request("/api/analyze", "image", &tiny_png(), "image/jpeg"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        skin.recorder.path_param.lock().unwrap().as_deref(),
        Some("1024")
    );
}

#[tokio::test]
async fn test_provider_error_status_becomes_500() {
    let skin = spawn_skin_upstream(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"code": 5000, "message": "face not detected"}),
    )
    .await;
    let app = app_with(test_config(&closed_port_url().await, &skin.base_url));

    let response = app
        .oneshot(multipart_request("/api/analyze", "image", &tiny_png(), "image/png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], -1);
    assert_eq!(body["message"], "Analysis service temporarily unavailable");
    assert_eq!(body["error"], "Skin provider returned status 500");
    assert_eq!(body["providerResponse"]["message"], "face not detected");
}

#[tokio::test]
async fn test_unreachable_provider() {
    let app = app_with(test_config(&closed_port_url().await, &closed_port_url().await));

    let response = app
        .oneshot(multipart_request("/api/analyze", "image", &tiny_png(), "image/png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], -1);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Skin analysis request failed"));
}

#[tokio::test]
async fn test_missing_image_is_rejected() {
    let skin = spawn_skin_upstream(StatusCode::OK, json!({"code": 0})).await;
    let app = app_with(test_config(&closed_port_url().await, &skin.base_url));

    let response = app
        .oneshot(multipart_text_only_request("/api/analyze"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({"code": -1, "message": "Please upload an image"}));
    assert_eq!(skin.recorder.hits(), 0);
}

#[tokio::test]
async fn test_missing_credentials() {
    let skin = spawn_skin_upstream(StatusCode::OK, json!({"code": 0})).await;
    let mut config = test_config(&closed_port_url().await, &skin.base_url);
    config.skin.client_secret = None;
    let app = app_with(config);

    let response = app
        .oneshot(multipart_request("/api/analyze", "image", &tiny_png(), "image/png"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], -1);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("SKIN_API_CLIENT_SECRET"));
    assert_eq!(skin.recorder.hits(), 0);
}
