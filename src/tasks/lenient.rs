//! Lenient field decoding for free-form model output.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Scalar as text; numbers and booleans are stringified, null is `None`
pub(crate) fn scalar_to_string(value: Value) -> Result<Option<String>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(format!("expected a scalar, found {}", other)),
    }
}

/// String field that also accepts numbers, booleans and null
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    scalar_to_string(value)
        .map(Option::unwrap_or_default)
        .map_err(D::Error::custom)
}

/// String field that also accepts a list of strings, joined by newlines
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => {
            let lines = items
                .into_iter()
                .map(scalar_to_string)
                .collect::<Result<Vec<_>, _>>()
                .map_err(D::Error::custom)?;
            Ok(lines.into_iter().flatten().collect::<Vec<_>>().join("\n"))
        }
        other => scalar_to_string(other)
            .map(Option::unwrap_or_default)
            .map_err(D::Error::custom),
    }
}

/// Like [`string_or_list`], with blank text read as `None`
pub(crate) fn optional_string_or_list<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = string_or_list(deserializer)?;
    Ok(Some(text).filter(|s| !s.trim().is_empty()))
}

/// List field that also accepts a single string or null
pub(crate) fn list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .map(scalar_to_string)
            .collect::<Result<Vec<_>, _>>()
            .map(|v| v.into_iter().flatten().filter(|s| !s.trim().is_empty()).collect())
            .map_err(D::Error::custom),
        other => scalar_to_string(other)
            .map(|s| s.into_iter().filter(|s| !s.trim().is_empty()).collect())
            .map_err(D::Error::custom),
    }
}

/// Strip a surrounding markdown code fence, if any
pub(crate) fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // drop the info string ("json") on the opening line
    match body.split_once('\n') {
        Some((_, inner)) => inner.trim(),
        None => body.trim(),
    }
}
