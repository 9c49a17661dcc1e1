// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Immutable gateway configuration, built once at startup

pub mod provider;

pub use provider::{SkinProviderConfig, VisionProviderConfig};

use anyhow::{anyhow, Result};
use std::net::SocketAddr;

pub const DEFAULT_PORT: u16 = 80;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
    pub skin: SkinProviderConfig,
    pub vision: VisionProviderConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            skin: SkinProviderConfig::default(),
            vision: VisionProviderConfig::default(),
        }
    }
}

impl GatewayConfig {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse::<SocketAddr>()
            .map_err(|e| anyhow!("Invalid listen address {}:{}: {}", self.host, self.port, e))
    }

    /// Check base URLs before the server starts taking traffic
    pub fn validate(&self) -> Result<()> {
        validate_base_url("SKIN_API_URL", &self.skin.base_url)?;
        validate_base_url("OPENAI_BASE_URL", &self.vision.base_url)?;
        if self.vision.model.trim().is_empty() {
            return Err(anyhow!("OPENAI_MODEL must not be empty"));
        }
        Ok(())
    }
}

fn validate_base_url(name: &str, value: &str) -> Result<()> {
    let parsed = url::Url::parse(value).map_err(|e| anyhow!("{} is not a valid URL: {}", name, e))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(anyhow!("{} must use http or https, got '{}'", name, other)),
    }
}

/// Normalize a base URL so paths can be appended with a single '/'
pub fn trim_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

/// Render a secret for logs: "***" plus its last four characters
pub fn mask_secret(secret: Option<&str>) -> String {
    match secret {
        Some(s) if !s.is_empty() => {
            let tail: String = s
                .chars()
                .rev()
                .take(4)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("***{}", tail)
        }
        _ => "NOT SET".to_string(),
    }
}
