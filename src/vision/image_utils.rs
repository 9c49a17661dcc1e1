// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image payload helpers shared by the upload and base64 entry points

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use thiserror::Error;

/// Maximum image size (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// MIME type assumed when the bytes are not a recognised format
pub const DEFAULT_MIME: &str = "image/jpeg";

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Image data is empty")]
    EmptyData,
}

/// Strip an optional `data:<mime>;base64,` prefix
pub fn strip_data_url_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    if trimmed.starts_with("data:") {
        if let Some(idx) = trimmed.find(";base64,") {
            return &trimmed[idx + ";base64,".len()..];
        }
    }
    trimmed
}

/// Decode a base64 image (raw or data URL) into bytes
pub fn decode_base64_image(base64_str: &str) -> Result<Vec<u8>, ImageError> {
    let payload = strip_data_url_prefix(base64_str);
    if payload.is_empty() {
        return Err(ImageError::EmptyData);
    }

    // Tolerate line-wrapped base64
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD.decode(compact)?;
    check_image_bytes(&bytes)?;
    Ok(bytes)
}

/// Size checks applied to every image regardless of how it arrived
pub fn check_image_bytes(bytes: &[u8]) -> Result<(), ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::EmptyData);
    }
    if bytes.len() > MAX_IMAGE_SIZE {
        return Err(ImageError::TooLarge(bytes.len(), MAX_IMAGE_SIZE));
    }
    Ok(())
}

/// Best-effort MIME type from magic bytes
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        Ok(ImageFormat::WebP) => "image/webp",
        Ok(ImageFormat::Gif) => "image/gif",
        Ok(ImageFormat::Bmp) => "image/bmp",
        _ => DEFAULT_MIME,
    }
}

/// `data:` URL for inlining an image into a chat-completions message
pub fn to_data_url(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", sniff_mime(bytes), STANDARD.encode(bytes))
}

/// Kilobytes with two decimals, for log lines
pub fn size_kb(bytes: usize) -> String {
    format!("{:.2}", bytes as f64 / 1024.0)
}
