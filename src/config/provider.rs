// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Settings for the two upstream providers

use std::time::Duration;

pub const DEFAULT_SKIN_API_URL: &str = "https://api.yimei.ai";
/// Acne detection only
pub const DEFAULT_DETECT_TYPES: &str = "65536";
pub const SKIN_TIMEOUT: Duration = Duration::from_secs(30);

pub const DEFAULT_VISION_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";
/// Generative vision calls are slow; this is a hard cap, never a retry budget
pub const VISION_TIMEOUT: Duration = Duration::from_secs(120);

/// Face/skin detection provider (HTTP Basic auth)
#[derive(Debug, Clone)]
pub struct SkinProviderConfig {
    pub base_url: String,
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub detect_types: String,
    pub timeout: Duration,
}

impl Default for SkinProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SKIN_API_URL.to_string(),
            client_id: None,
            client_secret: None,
            detect_types: DEFAULT_DETECT_TYPES.to_string(),
            timeout: SKIN_TIMEOUT,
        }
    }
}

impl SkinProviderConfig {
    pub fn is_configured(&self) -> bool {
        has_value(&self.client_id) && has_value(&self.client_secret)
    }
}

/// OpenAI-compatible chat-completions provider (bearer auth)
#[derive(Debug, Clone)]
pub struct VisionProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl Default for VisionProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_VISION_BASE_URL.to_string(),
            api_key: None,
            model: DEFAULT_VISION_MODEL.to_string(),
            timeout: VISION_TIMEOUT,
        }
    }
}

impl VisionProviderConfig {
    pub fn is_configured(&self) -> bool {
        has_value(&self.api_key)
    }
}

fn has_value(value: &Option<String>) -> bool {
    value.as_deref().map(|v| !v.trim().is_empty()).unwrap_or(false)
}
