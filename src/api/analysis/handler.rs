// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Product / snack analysis endpoint handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument, Span};
use uuid::Uuid;

use super::request::{AnalysisRequest, Base64AnalysisRequest, SourceEncoding};
use super::response::AnalysisResponse;
use crate::api::errors::{AnalysisFailure, GatewayError};
use crate::api::http_server::AppState;
use crate::api::upload::read_image_upload;
use crate::vision::image_utils::size_kb;
use crate::vision::AnalysisMode;

/// POST /api/analysis/product - Skincare product analysis from an upload
///
/// Multipart field `image`. Responds `{success: true, data}` with
/// `data.type = "PRODUCT"`.
pub async fn product_analysis_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, AnalysisFailure> {
    analyze_upload(&state, multipart, AnalysisMode::Product).await
}

/// POST /api/analysis/snack - Snack nutrition analysis from an upload
///
/// Multipart field `image`. Responds `{success: true, data}` with
/// `data.type = "SNACK"`.
pub async fn snack_analysis_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResponse>, AnalysisFailure> {
    analyze_upload(&state, multipart, AnalysisMode::Snack).await
}

/// POST /api/analysis/analyze-base64 - Analysis from a JSON body
///
/// # Request
/// - `image`: Base64-encoded image, optionally a `data:` URL (required)
/// - `mode`: "PRODUCT" or "SNACK" (required)
///
/// # Errors
/// - 400 Bad Request: malformed body, missing image, unsupported mode
/// - 500 Internal Server Error: configuration, upstream or reply problems
pub async fn analyze_base64_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<Base64AnalysisRequest>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, AnalysisFailure> {
    async move {
        let Json(payload) = payload.map_err(|rejection| {
            warn!("Base64 analysis body rejected: {}", rejection.body_text());
            AnalysisFailure(GatewayError::Validation(format!(
                "Invalid request body: {}",
                rejection.body_text()
            )))
        })?;

        let request = payload.into_analysis_request().map_err(|e| {
            warn!("Base64 analysis validation failed: {}", e);
            AnalysisFailure(e)
        })?;
        run_analysis(&state, request).await
    }
    .instrument(analysis_span(SourceEncoding::Base64))
    .await
}

fn analysis_span(source: SourceEncoding) -> Span {
    info_span!("analysis", request_id = %Uuid::new_v4(), source = ?source)
}

async fn analyze_upload(
    state: &AppState,
    multipart: Result<Multipart, MultipartRejection>,
    mode: AnalysisMode,
) -> Result<Json<AnalysisResponse>, AnalysisFailure> {
    async move {
        let upload = read_image_upload(multipart).await.map_err(|e| {
            warn!("[{}] Rejected upload: {}", mode, e);
            AnalysisFailure(e)
        })?;
        run_analysis(state, AnalysisRequest::from_upload(upload, mode)).await
    }
    .instrument(analysis_span(SourceEncoding::Multipart))
    .await
}

/// Call the vision model and log one line describing the outcome
async fn run_analysis(
    state: &AppState,
    request: AnalysisRequest,
) -> Result<Json<AnalysisResponse>, AnalysisFailure> {
    let start = Instant::now();
    info!(
        "[{}] Analysis request received, image size: {} KB",
        request.mode,
        size_kb(request.image.len())
    );

    match state.vlm_client.analyze(&request.image, request.mode).await {
        Ok(data) => {
            info!(
                "[{}] Completed in {}ms, fields: {}",
                request.mode,
                start.elapsed().as_millis(),
                data.keys().cloned().collect::<Vec<_>>().join(", ")
            );
            Ok(Json(AnalysisResponse::new(data)))
        }
        Err(e) => {
            warn!(
                "[{}] Failed after {}ms ({}): {}",
                request.mode,
                start.elapsed().as_millis(),
                e.kind(),
                e
            );
            Err(AnalysisFailure(e))
        }
    }
}
