//! Parse LLM output into keyword lists

use crate::LlmError;
use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

/// Longest keyword accepted from a model response
pub const MAX_KEYWORD_LEN: usize = 100;

/// Parse a keyword list out of a model response
///
/// Accepts a JSON array of strings, an object with a `keywords` array, either
/// one wrapped in a markdown code block, or as a last resort a comma or
/// newline separated list.
pub fn parse_keyword_response(response: &str, max_keywords: usize) -> Result<Vec<String>, LlmError> {
    let body = strip_code_fence(response);
    if body.is_empty() {
        return Err(LlmError::InvalidResponse("Empty keyword response".to_string()));
    }

    let raw = match serde_json::from_str::<Value>(body) {
        Ok(json) => keywords_from_json(&json)?,
        Err(_) => keywords_from_list(body),
    };

    Ok(clean_keywords(raw, max_keywords))
}

/// Remove a surrounding ```/```json fence, if present
fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let without_open = match trimmed.find('\n') {
        Some(newline) => &trimmed[newline + 1..],
        None => return "",
    };
    without_open
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(without_open)
        .trim()
}

fn keywords_from_json(json: &Value) -> Result<Vec<String>, LlmError> {
    let array = match json {
        Value::Array(items) => items,
        Value::Object(obj) => obj
            .get("keywords")
            .and_then(Value::as_array)
            .ok_or_else(|| LlmError::InvalidResponse("Object has no 'keywords' array".to_string()))?,
        _ => {
            return Err(LlmError::InvalidResponse(
                "Expected JSON array of keywords".to_string(),
            ))
        }
    };

    Ok(array
        .iter()
        .filter_map(|v| match v.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                warn!("Skipping non-string keyword: {}", v);
                None
            }
        })
        .collect())
}

fn keywords_from_list(body: &str) -> Vec<String> {
    body.split(|c: char| c == ',' || c == '\n')
        .map(|item| strip_list_marker(item.trim()).trim().trim_matches('"').to_string())
        .collect()
}

/// Remove a leading `- `, `* ` or `12. ` marker; anything else is kept
fn strip_list_marker(item: &str) -> &str {
    if let Some(rest) = item.strip_prefix(['-', '*']) {
        if rest.starts_with(char::is_whitespace) {
            return rest;
        }
    }

    let digits = item.len() - item.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits > 0 {
        if let Some(rest) = item[digits..].strip_prefix('.') {
            if rest.starts_with(char::is_whitespace) {
                return rest;
            }
        }
    }
    item
}

/// Trim, drop empty and oversized entries, dedupe case-insensitively, cap
fn clean_keywords(raw: Vec<String>, max_keywords: usize) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty() && k.len() < MAX_KEYWORD_LEN)
        .filter(|k| seen.insert(k.to_lowercase()))
        .take(max_keywords)
        .collect()
}
