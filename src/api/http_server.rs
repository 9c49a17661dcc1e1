// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use super::analysis::{analyze_base64_handler, product_analysis_handler, snack_analysis_handler};
use super::handlers::{
    api_test_handler, handle_panic, health_handler, not_found_handler, root_handler,
};
use super::skin::skin_analysis_handler;
use crate::config::{mask_secret, GatewayConfig};
use crate::vision::{SkinClient, VlmClient};

/// Request body cap; base64 JSON of a 10MB image needs headroom
pub const MAX_BODY_SIZE: usize = 50 * 1024 * 1024;

/// Shared, read-only state handed to every handler
pub struct AppState {
    pub config: GatewayConfig,
    pub vlm_client: VlmClient,
    pub skin_client: SkinClient,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let vlm_client = VlmClient::new(&config.vision)?;
        let skin_client = SkinClient::new(&config.skin)?;
        Ok(Self {
            config,
            vlm_client,
            skin_client,
        })
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    let router = Router::new()
        // Health check
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        // Configuration echo
        .route("/api/test", get(api_test_handler))
        // Skin detection
        .route("/api/analyze", post(skin_analysis_handler))
        // Generative analysis
        .route("/api/analysis/product", post(product_analysis_handler))
        .route("/api/analysis/snack", post(snack_analysis_handler))
        .route("/api/analysis/analyze-base64", post(analyze_base64_handler))
        // Unknown paths and known paths with the wrong method share the 404 envelope
        .fallback(not_found_handler)
        .method_not_allowed_fallback(not_found_handler);

    apply_middleware(router).with_state(state)
}

/// Layers shared by every route
pub fn apply_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// Log the effective configuration without leaking secrets
pub fn log_startup_config(config: &GatewayConfig) {
    info!("========================================");
    info!("  {}", crate::version::get_version_string());
    info!("========================================");
    info!("  - Skin API: {}", config.skin.base_url);
    info!("  - Skin detect types: {}", config.skin.detect_types);
    info!(
        "  - Skin client secret: {}",
        mask_secret(config.skin.client_secret.as_deref())
    );
    info!("  - Vision model: {}", config.vision.model);
    info!("  - Vision base URL: {}", config.vision.base_url);
    info!(
        "  - Vision API key: {}",
        mask_secret(config.vision.api_key.as_deref())
    );
    info!("========================================");
}

pub async fn start_server(state: AppState) -> Result<()> {
    let addr: SocketAddr = state.config.listen_addr()?;
    let app = create_app(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, run until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
