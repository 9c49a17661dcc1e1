// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Skin analysis endpoint handler

use axum::{extract::State, Json};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::api::errors::SkinFailure;
use crate::api::http_server::AppState;
use crate::api::upload::read_image_upload;
use crate::vision::image_utils::size_kb;

/// POST /api/analyze - Face/skin detection
///
/// Multipart field `image`. The provider's JSON (`{code, message, ...}`) is
/// returned unchanged. Failures answer `{code: -1, message, error}`.
pub async fn skin_analysis_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, SkinFailure> {
    let span = info_span!("skin_analysis", request_id = %Uuid::new_v4());

    async move {
        let start = Instant::now();
        let upload = read_image_upload(multipart).await.map_err(|e| {
            warn!("[SKIN] Rejected upload: {}", e);
            SkinFailure(e)
        })?;
        info!(
            "[SKIN] Analysis request received, image size: {} KB",
            size_kb(upload.bytes.len())
        );

        match state
            .skin_client
            .analyze(upload.bytes, upload.content_type.as_deref())
            .await
        {
            Ok(result) => {
                let code = result.get("code").cloned().unwrap_or_default();
                info!(
                    "[SKIN] Completed in {}ms, code: {}",
                    start.elapsed().as_millis(),
                    code
                );
                Ok(Json(result))
            }
            Err(e) => {
                warn!(
                    "[SKIN] Failed after {}ms ({}): {}",
                    start.elapsed().as_millis(),
                    e.kind(),
                    e
                );
                Err(SkinFailure(e))
            }
        }
    }
    .instrument(span)
    .await
}
