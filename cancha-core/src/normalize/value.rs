//! Loose-value readers for heterogeneous backend payloads.
//!
//! Every reader takes a list of candidate keys - the explicit field-mapping
//! table for that canonical field - and degrades to a default instead of
//! failing. Numeric fields accept a number or a numeric string; anything
//! else is "not set".

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

/// First non-null value under any of the candidate keys.
pub fn field<'a>(raw: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let map = raw.as_object()?;
    for key in keys {
        if let Some(value) = map.get(*key) {
            if !value.is_null() {
                return Some(value);
            }
        }
    }
    None
}

/// String under any candidate key; numbers and booleans are stringified,
/// everything else degrades to `""`.
pub fn get_str(raw: &Value, keys: &[&str]) -> String {
    match field(raw, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Integer under any candidate key, accepting numbers, integral floats,
/// and numeric strings.
pub fn get_opt_i64(raw: &Value, keys: &[&str]) -> Option<i64> {
    field(raw, keys).and_then(coerce_i64)
}

/// Positive-id variant: zero and negatives count as "not set" (the backend
/// uses `id=0` as an unset sentinel, e.g. `GetViewModelTournament?id=0`).
pub fn get_id(raw: &Value, keys: &[&str]) -> Option<i64> {
    get_opt_i64(raw, keys).filter(|id| *id > 0)
}

/// Non-negative integer with a default for missing or malformed values.
pub fn get_u32(raw: &Value, keys: &[&str], default: u32) -> u32 {
    get_opt_i64(raw, keys)
        .filter(|n| *n >= 0 && *n <= u32::MAX as i64)
        .map(|n| n as u32)
        .unwrap_or(default)
}

/// Timestamp under any candidate key, echoed verbatim when it parses as a
/// supported ISO 8601 shape and normalized to `""` otherwise. Consumers
/// treat `""` as "no date", never as the epoch.
pub fn get_date(raw: &Value, keys: &[&str]) -> String {
    let text = get_str(raw, keys);
    if parse_timestamp(&text).is_some() {
        text
    } else {
        String::new()
    }
}

pub fn coerce_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

/// Accepted timestamp shapes: RFC 3339, naive `T`-separated with optional
/// fractional seconds, space-separated, and a bare date.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_prefers_earlier_keys_and_skips_null() {
        let raw = json!({"statusId": null, "estatusID": 3, "estado": "x"});
        let found = field(&raw, &["statusId", "estatusID"]).unwrap();
        assert_eq!(found, &json!(3));
    }

    #[test]
    fn test_get_str_stringifies_numbers() {
        let raw = json!({"name": 42});
        assert_eq!(get_str(&raw, &["name"]), "42");
    }

    #[test]
    fn test_get_str_missing_is_empty() {
        assert_eq!(get_str(&json!({}), &["name"]), "");
        assert_eq!(get_str(&json!(null), &["name"]), "");
        assert_eq!(get_str(&json!({"name": [1]}), &["name"]), "");
    }

    #[test]
    fn test_numeric_coercion() {
        let raw = json!({"a": 5, "b": "7", "c": " 9 ", "d": 3.0, "e": "abc", "f": 3.5});
        assert_eq!(get_opt_i64(&raw, &["a"]), Some(5));
        assert_eq!(get_opt_i64(&raw, &["b"]), Some(7));
        assert_eq!(get_opt_i64(&raw, &["c"]), Some(9));
        assert_eq!(get_opt_i64(&raw, &["d"]), Some(3));
        assert_eq!(get_opt_i64(&raw, &["e"]), None);
        assert_eq!(get_opt_i64(&raw, &["f"]), None);
        assert_eq!(get_opt_i64(&raw, &["missing"]), None);
    }

    #[test]
    fn test_get_id_rejects_zero_and_negative() {
        let raw = json!({"a": 0, "b": -4, "c": 12});
        assert_eq!(get_id(&raw, &["a"]), None);
        assert_eq!(get_id(&raw, &["b"]), None);
        assert_eq!(get_id(&raw, &["c"]), Some(12));
    }

    #[test]
    fn test_get_u32_defaults() {
        let raw = json!({"capacity": -5, "other": "20"});
        assert_eq!(get_u32(&raw, &["capacity"], 0), 0);
        assert_eq!(get_u32(&raw, &["other"], 0), 20);
        assert_eq!(get_u32(&raw, &["missing"], 0), 0);
    }

    #[test]
    fn test_get_date_valid_shapes() {
        let raw = json!({
            "a": "2025-07-01T10:00:00Z",
            "b": "2025-07-01T10:00:00",
            "c": "2025-07-01",
            "d": "2025-07-01T10:00:00.123Z",
        });
        assert_eq!(get_date(&raw, &["a"]), "2025-07-01T10:00:00Z");
        assert_eq!(get_date(&raw, &["b"]), "2025-07-01T10:00:00");
        assert_eq!(get_date(&raw, &["c"]), "2025-07-01");
        assert_eq!(get_date(&raw, &["d"]), "2025-07-01T10:00:00.123Z");
    }

    #[test]
    fn test_get_date_invalid_is_empty() {
        let raw = json!({"a": "mañana", "b": 20250701, "c": ""});
        assert_eq!(get_date(&raw, &["a"]), "");
        assert_eq!(get_date(&raw, &["b"]), "");
        assert_eq!(get_date(&raw, &["c"]), "");
        assert_eq!(get_date(&raw, &["missing"]), "");
    }
}
