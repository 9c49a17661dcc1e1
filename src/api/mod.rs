// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod analysis;
pub mod errors;
pub mod handlers;
pub mod http_server;
pub mod skin;
pub mod upload;

pub use analysis::{AnalysisRequest, AnalysisResponse, Base64AnalysisRequest, SourceEncoding};
pub use errors::{AnalysisFailure, GatewayError, GatewayResult, SkinFailure};
pub use handlers::{ApiTestResponse, HealthResponse, ServiceInfoResponse};
pub use http_server::{apply_middleware, create_app, start_server, AppState};
pub use upload::ImageUpload;
