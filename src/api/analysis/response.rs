// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analysis response envelope

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `{success: true, data}` where `data` is the model's object plus `type`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    pub data: Map<String, Value>,
}

impl AnalysisResponse {
    pub fn new(data: Map<String, Value>) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
