//! JSON coercion at the storage boundary.
//!
//! `payload` and `meta` are persisted as UTF-8 JSON text of a string-keyed
//! mapping. Rust's [`serde_json::Value`] is already JSON-safe, so the only
//! coercion left is shape: non-object values are wrapped as `{"value": ...}`
//! so the stored document is always a mapping. On the way out, malformed or
//! non-object stored text degrades to an empty mapping rather than failing
//! the whole read.

use serde_json::{Map, Value};

/// Coerce a value to a string-keyed JSON object for storage.
///
/// Objects pass through, `null` becomes the empty object, anything else is
/// wrapped under a `"value"` key.
#[must_use]
pub fn to_object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            let _ = map.insert("value".to_string(), other);
            map
        }
    }
}

/// Parse stored JSON text, degrading to an empty object on malformed or
/// non-object content.
#[must_use]
pub fn safe_load_json(raw: &str) -> Map<String, Value> {
    if raw.is_empty() {
        return Map::new();
    }
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => Map::new(),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_passes_through() {
        let map = to_object(json!({"role": "user"}));
        assert_eq!(map.get("role"), Some(&json!("user")));
    }

    #[test]
    fn null_becomes_empty_object() {
        assert!(to_object(Value::Null).is_empty());
    }

    #[test]
    fn scalar_is_wrapped() {
        let map = to_object(json!("plain text"));
        assert_eq!(map.get("value"), Some(&json!("plain text")));
        let map = to_object(json!([1, 2]));
        assert_eq!(map.get("value"), Some(&json!([1, 2])));
    }

    #[test]
    fn malformed_stored_text_degrades_to_empty() {
        assert!(safe_load_json("").is_empty());
        assert!(safe_load_json("{not json").is_empty());
        assert!(safe_load_json("[1, 2, 3]").is_empty());
        assert_eq!(safe_load_json(r#"{"a": 1}"#).get("a"), Some(&json!(1)));
    }
}
