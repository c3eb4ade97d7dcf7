//! Key sanitization for restrictive store backends
//!
//! Some key-value backends forbid `. # $ [ ] /` in key names. Every mapping
//! key is rewritten with `_` before persistence, recursively through nested
//! maps and sequences. The rewrite is one-directional and lossy: a key that
//! contained a reserved character cannot be recovered. Keys without reserved
//! characters round-trip unchanged.

use serde_json::Value;

const RESERVED: [char; 6] = ['.', '#', '$', '[', ']', '/'];

/// Replace each reserved character in one key with `_`.
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect()
}

/// Sanitize every mapping key in a JSON document, recursively.
pub fn sanitize_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (sanitize_key(&k), sanitize_keys(v)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(sanitize_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_keys_are_identity() {
        let doc = json!({"abc": 1, "nested": {"xyz": [1, 2, 3]}});
        assert_eq!(sanitize_keys(doc.clone()), doc);
    }

    #[test]
    fn test_reserved_characters_replaced() {
        assert_eq!(sanitize_key("a.b#c$d[e]f/g"), "a_b_c_d_e_f_g");
        let doc = json!({"serie/uno": {"x.y": 1}, "plain": ["a.b"]});
        let sanitized = sanitize_keys(doc);
        assert_eq!(
            sanitized,
            json!({"serie_uno": {"x_y": 1}, "plain": ["a.b"]})
        );
    }

    #[test]
    fn test_values_are_untouched() {
        let doc = json!({"k": "#FF0000"});
        assert_eq!(sanitize_keys(doc.clone()), doc);
    }
}
