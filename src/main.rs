// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use clap::Parser;
use skin_analysis_gateway::{
    api::http_server::{log_startup_config, start_server},
    cli::Cli,
    AppState,
};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before clap reads the environment
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    let config = Cli::parse().into_config();
    config.validate()?;
    log_startup_config(&config);

    let state = AppState::new(config)?;
    start_server(state).await
}
