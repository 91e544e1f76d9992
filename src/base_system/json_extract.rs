//! Defensive helpers for picking fields out of loosely-shaped JSON.

use serde_json::Value;

pub type JsonMap = serde_json::Map<String, Value>;

/// First key whose value is a non-empty string, trimmed.
///
/// Deliberately strict about types: a numeric or object value under one of
/// the keys counts as absent, never coerced.
pub fn pick_string(map: &JsonMap, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(val) = map.get(*key)
            && let Some(s) = val.as_str()
        {
            let trimmed = s.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// String entries of an array value, trimmed, empties dropped.
/// A missing key or a non-array value yields an empty list.
pub fn pick_string_list(map: &JsonMap, key: &str) -> Vec<String> {
    match map.get(key) {
        Some(Value::Array(arr)) => arr
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: serde_json::Value) -> JsonMap {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn pick_string_prefers_earlier_keys_and_skips_non_strings() {
        let m = map(json!({"a": 7, "b": "  hit  ", "c": "later"}));
        assert_eq!(pick_string(&m, &["a", "b", "c"]), Some("hit".to_string()));
        assert_eq!(pick_string(&m, &["a"]), None);
        assert_eq!(pick_string(&m, &["missing"]), None);
    }

    #[test]
    fn pick_string_list_keeps_order_and_drops_junk() {
        let m = map(json!({"authors": ["A", "", 3, " B "], "title": "x"}));
        assert_eq!(pick_string_list(&m, "authors"), vec!["A", "B"]);
        assert!(pick_string_list(&m, "title").is_empty());
        assert!(pick_string_list(&m, "missing").is_empty());
    }
}
