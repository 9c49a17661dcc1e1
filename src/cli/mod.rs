// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;

use crate::config::{
    provider::{
        DEFAULT_DETECT_TYPES, DEFAULT_SKIN_API_URL, DEFAULT_VISION_BASE_URL,
        DEFAULT_VISION_MODEL, SKIN_TIMEOUT, VISION_TIMEOUT,
    },
    trim_base_url, GatewayConfig, SkinProviderConfig, VisionProviderConfig, DEFAULT_HOST,
    DEFAULT_PORT,
};

/// Skin / product / snack analysis gateway
///
/// Every option can also be supplied through the environment (or a `.env` file).
#[derive(Parser, Debug, Clone)]
#[command(name = "skin-analysis-gateway")]
#[command(version)]
#[command(about = "HTTP gateway for skin, product and snack image analysis", long_about = None)]
pub struct Cli {
    /// Bind address
    #[arg(long, env = "HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Listening port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Skin analysis provider base URL
    #[arg(long, env = "SKIN_API_URL", default_value = DEFAULT_SKIN_API_URL)]
    pub skin_api_url: String,

    #[arg(long, env = "SKIN_API_CLIENT_ID", hide_env_values = true)]
    pub skin_client_id: Option<String>,

    #[arg(long, env = "SKIN_API_CLIENT_SECRET", hide_env_values = true)]
    pub skin_client_secret: Option<String>,

    /// Detection-type code selecting which facial attributes are computed
    #[arg(long, env = "SKIN_DETECT_TYPES", default_value = DEFAULT_DETECT_TYPES)]
    pub skin_detect_types: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Chat-completions base URL (without the /chat/completions suffix)
    #[arg(long, env = "OPENAI_BASE_URL", default_value = DEFAULT_VISION_BASE_URL)]
    pub openai_base_url: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = DEFAULT_VISION_MODEL)]
    pub openai_model: String,
}

impl Cli {
    pub fn into_config(self) -> GatewayConfig {
        GatewayConfig {
            host: self.host,
            port: self.port,
            skin: SkinProviderConfig {
                base_url: trim_base_url(&self.skin_api_url),
                client_id: self.skin_client_id,
                client_secret: self.skin_client_secret,
                detect_types: self.skin_detect_types,
                timeout: SKIN_TIMEOUT,
            },
            vision: VisionProviderConfig {
                base_url: trim_base_url(&self.openai_base_url),
                api_key: self.openai_api_key,
                model: self.openai_model,
                timeout: VISION_TIMEOUT,
            },
        }
    }
}
