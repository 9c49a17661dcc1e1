// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analysis modes and the instruction prompts sent to the vision model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What kind of analysis a request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AnalysisMode {
    /// Face/skin detection via the deterministic provider
    Skin,
    /// Skincare product ingredient analysis via the vision model
    Product,
    /// Snack nutrition analysis via the vision model
    Snack,
}

impl AnalysisMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::Skin => "SKIN",
            AnalysisMode::Product => "PRODUCT",
            AnalysisMode::Snack => "SNACK",
        }
    }

    /// True for the modes served by the vision model
    pub fn is_generative(&self) -> bool {
        matches!(self, AnalysisMode::Product | AnalysisMode::Snack)
    }

    /// Instruction text for the vision model, `None` for the deterministic mode
    pub fn prompt(&self) -> Option<&'static str> {
        match self {
            AnalysisMode::Skin => None,
            AnalysisMode::Product => Some(PRODUCT_PROMPT),
            AnalysisMode::Snack => Some(SNACK_PROMPT),
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnalysisMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SKIN" => Ok(AnalysisMode::Skin),
            "PRODUCT" => Ok(AnalysisMode::Product),
            "SNACK" => Ok(AnalysisMode::Snack),
            other => Err(format!("unknown analysis mode '{}'", other)),
        }
    }
}

pub const PRODUCT_PROMPT: &str = r#"You are a professional skincare ingredient analyst. Analyse this photo of a skincare or cosmetic product, identify the product and its ingredients.

Return the following information as JSON:
{
  "productName": "product name",
  "brandName": "brand name",
  "productType": "product type (serum, cream, cleanser, ...)",
  "mainIngredients": ["main active ingredients"],
  "harmfulIngredients": ["potentially harmful ingredients, if any"],
  "suitableSkinTypes": ["suitable skin types"],
  "notSuitableFor": ["skin types or conditions it does not suit"],
  "efficacy": ["main effects"],
  "usageTips": ["usage tips"],
  "overallScore": 85,
  "safetyScore": 90,
  "efficacyScore": 80,
  "summary": "overall verdict (at most 50 words)",
  "warnings": ["warnings"]
}

All scores are integers from 0 to 100.

If the product cannot be identified, return: {"error": true, "message": "Product not recognised, please upload a clear photo of the front of the product or its ingredient list"}

Return only the JSON, no other text."#;

pub const SNACK_PROMPT: &str = r#"You are a professional nutritionist. Analyse this photo of a snack or packaged food, identify the product and its nutrition facts.

Return the following information as JSON:
{
  "productName": "product name",
  "brandName": "brand name",
  "category": "food category (puffed snack, biscuit, candy, ...)",
  "calories": "kcal per 100g",
  "caloriesPerServing": "kcal per serving",
  "servingSize": "serving size",
  "nutrition": {
    "protein": "protein (g)",
    "fat": "fat (g)",
    "saturatedFat": "saturated fat (g)",
    "carbs": "carbohydrates (g)",
    "sugar": "sugar (g)",
    "sodium": "sodium (mg)",
    "fiber": "dietary fibre (g)"
  },
  "additives": ["additives"],
  "harmfulAdditives": ["controversial or potentially harmful additives"],
  "healthScore": 60,
  "skinImpactScore": 50,
  "skinImpact": "effect on the skin",
  "acneTrigger": true or false,
  "acneTriggerReason": "why it may trigger acne, if it does",
  "recommendedFrequency": "recommended eating frequency",
  "healthTips": ["health tips"],
  "alternatives": ["healthier alternatives"],
  "summary": "overall verdict (at most 50 words)"
}

All scores are integers from 0 to 100.

If the food cannot be identified, return: {"error": true, "message": "Food not recognised, please upload a clear photo of the front of the package or its nutrition label"}

Return only the JSON, no other text."#;
