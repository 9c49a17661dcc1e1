// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Extracts a JSON object from a vision model's free-text reply
//!
//! Models are told to answer with bare JSON but routinely wrap it in a
//! ```json fence or surround it with prose. Strategies are tried in order and
//! the first one that yields a JSON object wins:
//!
//! 1. the whole reply
//! 2. the interior of the first ```json ... ``` fence
//! 3. the span from the first '{' to the last '}'

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::debug;

use super::prompts::AnalysisMode;
use crate::api::errors::{GatewayError, GatewayResult, DEFAULT_SEMANTIC_MESSAGE};

/// Which extraction strategy produced the object
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStrategy {
    Whole,
    FencedBlock,
    BraceSpan,
}

type Strategy = fn(&str) -> Option<Map<String, Value>>;

const STRATEGIES: &[(ExtractStrategy, Strategy)] = &[
    (ExtractStrategy::Whole, parse_whole),
    (ExtractStrategy::FencedBlock, parse_fenced_block),
    (ExtractStrategy::BraceSpan, parse_brace_span),
];

fn fenced_block_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"```json\s*([\s\S]*?)\s*```").expect("static regex"))
}

fn parse_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn parse_whole(reply: &str) -> Option<Map<String, Value>> {
    parse_object(reply)
}

fn parse_fenced_block(reply: &str) -> Option<Map<String, Value>> {
    let captures = fenced_block_regex().captures(reply)?;
    parse_object(captures.get(1)?.as_str())
}

fn parse_brace_span(reply: &str) -> Option<Map<String, Value>> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }
    parse_object(&reply[start..=end])
}

/// Run the strategy chain without interpreting the object
pub fn extract_json_object(reply: &str) -> GatewayResult<(Map<String, Value>, ExtractStrategy)> {
    for (kind, strategy) in STRATEGIES {
        if let Some(object) = strategy(reply) {
            return Ok((object, *kind));
        }
    }

    if reply.contains('{') {
        Err(GatewayError::Parse(
            "Could not parse the AI response format".to_string(),
        ))
    } else {
        Err(GatewayError::Parse(
            "AI response does not contain JSON".to_string(),
        ))
    }
}

/// JavaScript-style truthiness, which is how clients historically read `error`
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Turn a model reply into the normalized analysis result
///
/// Fails with `Parse` when no strategy yields an object, and with
/// `ProviderSemantic` when the model reports it could not identify the subject.
/// On success the object carries `type` set to the request mode.
pub fn parse_analysis_reply(reply: &str, mode: AnalysisMode) -> GatewayResult<Map<String, Value>> {
    let (mut object, strategy) = extract_json_object(reply)?;
    debug!("Model reply parsed via {:?}", strategy);

    if object.get("error").map(is_truthy).unwrap_or(false) {
        let message = object
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_SEMANTIC_MESSAGE)
            .to_string();
        return Err(GatewayError::ProviderSemantic(message));
    }

    object.insert("type".to_string(), Value::String(mode.as_str().to_string()));
    Ok(object)
}
