//! Response envelope decoding.
//!
//! Backend responses come in three shapes: a bare value, a
//! `{ data, success, message, errors }` envelope, or a single object where a
//! list was expected. These helpers collapse all of them into one normalized
//! shape at the HTTP boundary.

use serde_json::Value;

/// Unwraps a `{ data: X, ... }` envelope to `X`. Bare values pass through.
pub fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

/// Decodes a list response: bare array, enveloped array, or a single object
/// (wrapped into a one-element list). Anything else is an empty list.
pub fn collection(value: Value) -> Vec<Value> {
    match unwrap_data(value) {
        Value::Array(items) => items,
        Value::Object(map) => vec![Value::Object(map)],
        _ => Vec::new(),
    }
}

/// Detects a `{ success: false }` rejection on an otherwise 2xx response
/// and extracts the backend-provided message.
pub fn rejection(value: &Value) -> Option<String> {
    match value.get("success") {
        Some(Value::Bool(false)) => {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .unwrap_or("The server rejected the operation");
            Some(message.to_string())
        }
        _ => None,
    }
}

/// Merges a mutation response over the request payload. Response fields win;
/// payload fields fill in anything the backend echoed incompletely. A null
/// or non-object response falls back to the payload wholesale.
pub fn merge_fallback(response: Value, fallback: &Value) -> Value {
    let mut merged = match response {
        Value::Object(map) => map,
        _ => return fallback.clone(),
    };
    if let Value::Object(fb) = fallback {
        for (key, value) in fb {
            let missing = matches!(merged.get(key), None | Some(Value::Null));
            if missing {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(merged)
}
