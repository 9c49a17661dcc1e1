// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analysis request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::{GatewayError, GatewayResult};
use crate::api::upload::ImageUpload;
use crate::vision::{decode_base64_image, AnalysisMode};

/// How the image reached the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    Multipart,
    Base64,
}

/// One image to analyse in one mode; lives for a single call
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub image: Vec<u8>,
    pub mode: AnalysisMode,
    pub source_encoding: SourceEncoding,
}

impl AnalysisRequest {
    pub fn from_upload(upload: ImageUpload, mode: AnalysisMode) -> Self {
        Self {
            image: upload.bytes,
            mode,
            source_encoding: SourceEncoding::Multipart,
        }
    }
}

/// Body of POST /api/analysis/analyze-base64
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Base64AnalysisRequest {
    /// Base64 image data, optionally as a `data:` URL
    #[serde(default)]
    pub image: Option<String>,

    /// "PRODUCT" or "SNACK"
    #[serde(default)]
    pub mode: Option<String>,
}

impl Base64AnalysisRequest {
    /// Validate and decode into an [`AnalysisRequest`]
    ///
    /// The image is checked before the mode.
    pub fn into_analysis_request(self) -> GatewayResult<AnalysisRequest> {
        let image = self
            .image
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| GatewayError::Validation("Missing image data".to_string()))?;

        let mode = self
            .mode
            .as_deref()
            .and_then(|m| m.parse::<AnalysisMode>().ok())
            .filter(AnalysisMode::is_generative)
            .ok_or_else(|| GatewayError::Validation("Unsupported analysis mode".to_string()))?;

        let image = decode_base64_image(&image)
            .map_err(|e| GatewayError::Validation(format!("Invalid image: {}", e)))?;

        Ok(AnalysisRequest {
            image,
            mode,
            source_encoding: SourceEncoding::Base64,
        })
    }
}
