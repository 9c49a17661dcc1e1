// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Liveness, configuration echo and fallback handlers

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tracing::error;

use crate::api::errors::CodeErrorBody;
use crate::api::http_server::AppState;
use crate::version;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub features: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Non-secret view of the configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub skin_api: String,
    pub skin_configured: bool,
    pub vision_base_url: String,
    pub vision_model: String,
    pub vision_configured: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiTestResponse {
    pub code: i32,
    pub message: String,
    pub config: ConfigSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotFoundResponse {
    pub code: u16,
    pub message: String,
    pub path: String,
}

/// GET /
pub async fn root_handler() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        status: "ok".to_string(),
        service: version::SERVICE_NAME.to_string(),
        version: version::VERSION_NUMBER.to_string(),
        features: version::FEATURES.iter().map(|f| f.to_string()).collect(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// GET /api/test - echo which providers are wired up, never the secrets
pub async fn api_test_handler(State(state): State<Arc<AppState>>) -> Json<ApiTestResponse> {
    Json(ApiTestResponse {
        code: 0,
        message: "API service OK".to_string(),
        config: ConfigSummary {
            skin_api: state.skin_client.base_url().to_string(),
            skin_configured: state.skin_client.is_configured(),
            vision_base_url: state.vlm_client.endpoint().to_string(),
            vision_model: state.vlm_client.model_name().to_string(),
            vision_configured: state.vlm_client.is_configured(),
        },
    })
}

/// Fallback for unmatched routes
pub async fn not_found_handler(uri: Uri) -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            code: 404,
            message: "Not Found".to_string(),
            path: uri.path().to_string(),
        }),
    )
}

/// Converts a handler panic into the generic 500 envelope
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Unhandled service error: {}", detail);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(CodeErrorBody {
            code: -1,
            message: "internal error".to_string(),
            error: Some(detail),
            provider_response: None,
        }),
    )
        .into_response()
}
