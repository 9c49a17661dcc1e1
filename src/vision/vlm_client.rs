// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision model client for product/snack analysis via an OpenAI-compatible API

use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::image_utils::to_data_url;
use super::prompts::AnalysisMode;
use super::reply_parser::parse_analysis_reply;
use crate::api::errors::{GatewayError, GatewayResult};
use crate::config::VisionProviderConfig;

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(serde::Serialize)]
struct ChatMessage {
    role: String,
    content: serde_json::Value,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

const MAX_TOKENS: u32 = 2000;
const TEMPERATURE: f32 = 0.3;
/// How much of the raw reply goes into the debug log
const REPLY_LOG_CHARS: usize = 500;

/// Client for the generative vision provider
#[derive(Clone)]
pub struct VlmClient {
    client: Client,
    endpoint: String,
    model_name: String,
    api_key: Option<String>,
}

impl VlmClient {
    /// Create a new VLM client
    pub fn new(config: &VisionProviderConfig) -> anyhow::Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;

        let endpoint = config.base_url.trim_end_matches('/').to_string();
        info!(
            "VLM client configured: endpoint={}, model={}",
            endpoint, config.model
        );

        Ok(Self {
            client,
            endpoint,
            model_name: config.model.clone(),
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
        })
    }

    /// Get the model name
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Analyse an image in the given mode and return the normalized result
    pub async fn analyze(
        &self,
        image: &[u8],
        mode: AnalysisMode,
    ) -> GatewayResult<Map<String, Value>> {
        let prompt = mode.prompt().ok_or_else(|| {
            GatewayError::Validation(format!("Mode {} is not served by the vision model", mode))
        })?;
        let reply = self.complete(image, prompt).await?;
        parse_analysis_reply(&reply, mode)
    }

    /// Send one image + instruction and return the assistant's text reply
    pub async fn complete(&self, image: &[u8], prompt: &str) -> GatewayResult<String> {
        // Checked before anything touches the network
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GatewayError::Config("OPENAI_API_KEY is not configured".to_string()))?;

        let start = Instant::now();
        info!("Calling vision model {} ...", self.model_name);

        let request = build_chat_request(&self.model_name, prompt, &to_data_url(image));

        let response = self
            .client
            .post(format!("{}/chat/completions", self.endpoint))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Vision model request failed: {}", e);
                if e.is_timeout() {
                    GatewayError::upstream("Vision model request timed out")
                } else {
                    GatewayError::upstream(format!("Vision model request failed: {}", e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                "Vision model returned {}: {}",
                status,
                truncate_chars(&body, REPLY_LOG_CHARS)
            );
            return Err(classify_status(status, &body));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            GatewayError::upstream(format!("Vision model returned an unreadable body: {}", e))
        })?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| {
                warn!("Vision model returned an empty reply");
                GatewayError::upstream("AI returned an empty response")
            })?;

        debug!("Raw model reply: {}", truncate_chars(&content, REPLY_LOG_CHARS));
        info!(
            "Vision model replied in {}ms ({} chars)",
            start.elapsed().as_millis(),
            content.len()
        );

        Ok(content)
    }
}

fn build_chat_request(model: &str, prompt: &str, data_url: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: serde_json::json!([
                {"type": "text", "text": prompt},
                {"type": "image_url", "image_url": {"url": data_url, "detail": "high"}}
            ]),
        }],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

/// Map a non-success status to the message surfaced to clients
fn classify_status(status: StatusCode, body: &str) -> GatewayError {
    let message = match status {
        StatusCode::UNAUTHORIZED => "Invalid API key".to_string(),
        StatusCode::TOO_MANY_REQUESTS => "API rate limit exceeded, please try again later".to_string(),
        StatusCode::BAD_REQUEST => "Unsupported image format or malformed request".to_string(),
        other => format!("Vision model request failed with status {}", other.as_u16()),
    };

    GatewayError::Upstream {
        message,
        status: Some(status.as_u16()),
        body: serde_json::from_str(body).ok(),
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
