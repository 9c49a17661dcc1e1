// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upstream vision providers
//!
//! This module provides:
//! - Skin/face detection via the deterministic provider (`skin_client`)
//! - Product and snack analysis via a generative vision model (`vlm_client`)
//! - Tolerant JSON extraction from model replies (`reply_parser`)

pub mod image_utils;
pub mod prompts;
pub mod reply_parser;
pub mod skin_client;
pub mod vlm_client;

pub use image_utils::{decode_base64_image, sniff_mime, ImageError, MAX_IMAGE_SIZE};
pub use prompts::AnalysisMode;
pub use reply_parser::{extract_json_object, parse_analysis_reply, ExtractStrategy};
pub use skin_client::SkinClient;
pub use vlm_client::VlmClient;
