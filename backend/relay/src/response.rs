//! Response shape shim for the SoMark API.
//!
//! The service is seen returning results both flat (`{"markdown": ..}`) and
//! nested (`{"data": {"markdown": ..}}`). Both are accepted; the flat field wins
//! when it is present and non-empty.

use serde_json::Value;
use somark_core::ExtractedContent;

pub fn content_from_value(value: &Value) -> ExtractedContent {
    ExtractedContent {
        markdown: lookup(value, "markdown"),
        json: lookup(value, "json"),
    }
}

fn lookup(value: &Value, field: &str) -> String {
    present(value.get(field))
        .or_else(|| present(value.get("data").and_then(|data| data.get(field))))
        .unwrap_or_default()
}

/// Null, `false`, `0` and `""` count as absent. Structured values (the `json` field
/// may arrive as an object) are re-serialized compactly.
fn present(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_flat_shape() {
        let c = content_from_value(&json!({ "markdown": "# A", "json": "{\"a\":1}" }));
        assert_eq!(c.markdown, "# A");
        assert_eq!(c.json, "{\"a\":1}");
    }

    #[test]
    fn reads_nested_shape() {
        let c = content_from_value(&json!({ "code": 0, "data": { "markdown": "# B", "json": "[]" } }));
        assert_eq!(c.markdown, "# B");
        assert_eq!(c.json, "[]");
    }

    #[test]
    fn flat_takes_precedence() {
        let c = content_from_value(&json!({
            "markdown": "flat",
            "data": { "markdown": "nested", "json": "nested-json" }
        }));
        assert_eq!(c.markdown, "flat");
        assert_eq!(c.json, "nested-json");
    }

    #[test]
    fn empty_flat_falls_through_to_nested() {
        let c = content_from_value(&json!({ "markdown": "", "data": { "markdown": "nested" } }));
        assert_eq!(c.markdown, "nested");
    }

    #[test]
    fn zero_flat_falls_through_to_nested() {
        let c = content_from_value(&json!({ "markdown": 0, "json": 0, "data": { "markdown": "# N" } }));
        assert_eq!(c.markdown, "# N");
        assert_eq!(c.json, "");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let c = content_from_value(&json!({ "markdown": "only md" }));
        assert_eq!(c.markdown, "only md");
        assert_eq!(c.json, "");

        let c = content_from_value(&json!(["not", "an", "object"]));
        assert_eq!(c, ExtractedContent::default());
    }

    #[test]
    fn structured_json_field_is_serialized() {
        let c = content_from_value(&json!({ "data": { "json": { "pages": [1, 2] } } }));
        assert_eq!(c.json, r#"{"pages":[1,2]}"#);
    }
}
