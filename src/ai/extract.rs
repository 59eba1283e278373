// Best-effort JSON extraction from free-form model text
//
// Models wrap their JSON in prose, markdown fences, or both. The span taken
// is from the first '{' to the last '}', deliberately greedy rather than
// balance-aware, so text containing several top-level objects or stray braces
// can fail to parse and fall back. Callers that cannot degrade use the strict
// variant.

use serde_json::{Map, Value};

use crate::error::{AiError, Result};

/// Extract a JSON object from `text`, degrading to `{}` on any failure.
///
/// Pure and idempotent: the same text always yields the same value.
pub fn extract_json(text: &str) -> Value {
    try_extract_json(text).unwrap_or_else(|_| Value::Object(Map::new()))
}

/// Strict extraction: fail with `StructuredGeneration` when no parseable
/// JSON object is present.
pub fn try_extract_json(text: &str) -> Result<Value> {
    let span = json_span(text).ok_or_else(|| {
        AiError::StructuredGeneration("no JSON object found in model reply".to_string())
    })?;
    let value: Value = serde_json::from_str(span)
        .map_err(|e| AiError::StructuredGeneration(e.to_string()))?;
    match value {
        Value::Object(_) => Ok(value),
        _ => Err(AiError::StructuredGeneration(
            "extracted span is not a JSON object".to_string(),
        )),
    }
}

/// The first-'{'-to-last-'}' span, if both braces exist in order.
fn json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Read a string field, falling back to `default` when absent or non-string.
pub fn str_field(object: &Value, key: &str, default: &str) -> String {
    object
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Read an array of strings, dropping non-string elements; absent or
/// wrongly-typed fields yield an empty list.
pub fn string_array_field(object: &Value, key: &str) -> Vec<String> {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}
