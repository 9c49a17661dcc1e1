// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gateway error taxonomy and the two JSON envelopes errors are rendered into

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Message used when the model flags `error` without saying why
pub const DEFAULT_SEMANTIC_MESSAGE: &str = "Analysis failed, please try again";

#[derive(Debug, Error)]
pub enum GatewayError {
    /// Missing or malformed client input
    #[error("{0}")]
    Validation(String),

    /// A required secret or setting is absent
    #[error("{0}")]
    Config(String),

    /// Network failure or non-success status from a provider
    #[error("{message}")]
    Upstream {
        message: String,
        status: Option<u16>,
        /// Provider body kept for diagnostics
        body: Option<Value>,
    },

    /// Model reply did not contain a usable JSON object
    #[error("{0}")]
    Parse(String),

    /// Model understood the request but could not identify the subject
    #[error("{0}")]
    ProviderSemantic(String),
}

impl GatewayError {
    pub fn upstream(message: impl Into<String>) -> Self {
        GatewayError::Upstream {
            message: message.into(),
            status: None,
            body: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Config(_)
            | GatewayError::Upstream { .. }
            | GatewayError::Parse(_)
            | GatewayError::ProviderSemantic(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short tag for log lines
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "validation",
            GatewayError::Config(_) => "config",
            GatewayError::Upstream { .. } => "upstream",
            GatewayError::Parse(_) => "parse",
            GatewayError::ProviderSemantic(_) => "provider_semantic",
        }
    }
}

pub type GatewayResult<T> = std::result::Result<T, GatewayError>;

/// `{success: false, message}` body used by the analysis endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisErrorBody {
    pub success: bool,
    pub message: String,
}

/// `{code: -1, message, error}` body used by the skin endpoint and the panic fallback
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CodeErrorBody {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<Value>,
}

// Error response wrapper for /api/analysis/*
pub struct AnalysisFailure(pub GatewayError);

impl From<GatewayError> for AnalysisFailure {
    fn from(err: GatewayError) -> Self {
        AnalysisFailure(err)
    }
}

impl IntoResponse for AnalysisFailure {
    fn into_response(self) -> Response {
        let body = AnalysisErrorBody {
            success: false,
            message: self.0.to_string(),
        };
        (self.0.status_code(), Json(body)).into_response()
    }
}

// Error response wrapper for /api/analyze
pub struct SkinFailure(pub GatewayError);

impl From<GatewayError> for SkinFailure {
    fn from(err: GatewayError) -> Self {
        SkinFailure(err)
    }
}

impl IntoResponse for SkinFailure {
    fn into_response(self) -> Response {
        let status = self.0.status_code();
        let body = match self.0 {
            GatewayError::Validation(message) => CodeErrorBody {
                code: -1,
                message,
                error: None,
                provider_response: None,
            },
            GatewayError::Upstream { message, body, .. } => CodeErrorBody {
                code: -1,
                message: "Analysis service temporarily unavailable".to_string(),
                error: Some(message),
                provider_response: body,
            },
            other => CodeErrorBody {
                code: -1,
                message: "Analysis service temporarily unavailable".to_string(),
                error: Some(other.to_string()),
                provider_response: None,
            },
        };
        (status, Json(body)).into_response()
    }
}
