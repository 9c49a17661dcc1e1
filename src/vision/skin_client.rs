// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client for the deterministic face/skin detection provider
//!
//! The provider takes a multipart upload at
//! `POST {base}/v2/api/face/analysis/{detect_types}` with HTTP Basic
//! credentials and answers with a fixed-schema JSON document, which is passed
//! through to the caller untouched.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{header, multipart, Client};
use serde_json::Value;
use tracing::{info, warn};

use super::image_utils::DEFAULT_MIME;
use crate::api::errors::{GatewayError, GatewayResult};
use crate::config::SkinProviderConfig;

const UPLOAD_FILE_NAME: &str = "image.jpg";

#[derive(Clone)]
pub struct SkinClient {
    client: Client,
    base_url: String,
    detect_types: String,
    credentials: Option<(String, String)>,
}

impl SkinClient {
    pub fn new(config: &SkinProviderConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        let base_url = config.base_url.trim_end_matches('/').to_string();

        let credentials = if config.is_configured() {
            match (&config.client_id, &config.client_secret) {
                (Some(id), Some(secret)) => Some((id.clone(), secret.clone())),
                _ => None,
            }
        } else {
            None
        };

        info!(
            "Skin client configured: endpoint={}, detect_types={}",
            base_url, config.detect_types
        );

        Ok(Self {
            client,
            base_url,
            detect_types: config.detect_types.clone(),
            credentials,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn analysis_url(&self) -> String {
        format!("{}/v2/api/face/analysis/{}", self.base_url, self.detect_types)
    }

    /// Upload the image and return the provider's JSON reply as-is
    pub async fn analyze(&self, image: Vec<u8>, content_type: Option<&str>) -> GatewayResult<Value> {
        let (client_id, client_secret) = self.credentials.as_ref().ok_or_else(|| {
            GatewayError::Config(
                "SKIN_API_CLIENT_ID / SKIN_API_CLIENT_SECRET are not configured".to_string(),
            )
        })?;

        let part = multipart::Part::bytes(image)
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(upload_mime(content_type))
            .map_err(|e| GatewayError::Validation(format!("Invalid image content type: {}", e)))?;
        let form = multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(self.analysis_url())
            .header(header::AUTHORIZATION, basic_auth_header(client_id, client_secret))
            .header(header::ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!("Skin provider request failed: {}", e);
                if e.is_timeout() {
                    GatewayError::upstream("Skin analysis request timed out")
                } else {
                    GatewayError::upstream(format!("Skin analysis request failed: {}", e))
                }
            })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            GatewayError::upstream(format!("Failed to read skin provider response: {}", e))
        })?;
        let body: Option<Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            warn!("Skin provider returned {}", status);
            return Err(GatewayError::Upstream {
                message: format!("Skin provider returned status {}", status.as_u16()),
                status: Some(status.as_u16()),
                body: body.or_else(|| (!text.is_empty()).then(|| Value::String(text))),
            });
        }

        body.ok_or_else(|| GatewayError::upstream("Skin provider returned a non-JSON body"))
    }
}

/// `Basic base64(client_id:client_secret)`
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", client_id, client_secret))
    )
}

/// `image/<subtype>` from the client's content type, or the default
fn upload_mime(content_type: Option<&str>) -> &str {
    let is_token = |s: &str| {
        !s.is_empty()
            && s.chars()
                .all(|c| c.is_ascii_alphanumeric() || "!#$&-^_.+".contains(c))
    };

    content_type
        .and_then(|ct| ct.split(';').next())
        .map(str::trim)
        .filter(|essence| {
            essence
                .strip_prefix("image/")
                .map_or(false, is_token)
        })
        .unwrap_or(DEFAULT_MIME)
}
