// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Pulls the `image` file field out of a multipart upload

use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use tracing::{debug, warn};

use crate::api::errors::{GatewayError, GatewayResult};
use crate::vision::image_utils::check_image_bytes;

/// Multipart field carrying the picture
pub const IMAGE_FIELD: &str = "image";

pub const MISSING_IMAGE_MESSAGE: &str = "Please upload an image";

/// An uploaded image held in memory for the duration of one request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

/// Read the `image` field, ignoring every other field
///
/// A body that is not multipart at all is treated the same as an upload without
/// an image, so clients always get the validation envelope.
pub async fn read_image_upload(
    multipart: Result<Multipart, MultipartRejection>,
) -> GatewayResult<ImageUpload> {
    let mut multipart = multipart.map_err(|rejection| {
        debug!("Multipart rejected: {}", rejection);
        GatewayError::Validation(MISSING_IMAGE_MESSAGE.to_string())
    })?;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        warn!("Failed to read multipart body: {}", e);
        GatewayError::Validation(format!("Invalid upload: {}", e))
    })? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await.map_err(|e| {
            warn!("Failed to read image field: {}", e);
            GatewayError::Validation(format!("Invalid upload: {}", e))
        })?;

        if bytes.is_empty() {
            break;
        }
        check_image_bytes(&bytes).map_err(|e| GatewayError::Validation(e.to_string()))?;

        return Ok(ImageUpload {
            bytes: bytes.to_vec(),
            content_type,
        });
    }

    Err(GatewayError::Validation(MISSING_IMAGE_MESSAGE.to_string()))
}
