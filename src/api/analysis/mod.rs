// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generative analysis endpoints
//!
//! Provides POST /api/analysis/product, /api/analysis/snack and
//! /api/analysis/analyze-base64.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{analyze_base64_handler, product_analysis_handler, snack_analysis_handler};
pub use request::{AnalysisRequest, Base64AnalysisRequest, SourceEncoding};
pub use response::AnalysisResponse;
