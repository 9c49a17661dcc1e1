// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the analysis gateway

/// Service name reported by the root endpoint
pub const SERVICE_NAME: &str = "skin-product-snack-analysis";

/// Semantic version number
pub const VERSION_NUMBER: &str = "2.0.0";

/// Upstream integrations in this version
pub const FEATURES: &[&str] = &["skin-detection", "product-analysis", "snack-analysis", "base64-upload"];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Skin/Product/Snack Analysis Gateway {}", VERSION_NUMBER)
}
