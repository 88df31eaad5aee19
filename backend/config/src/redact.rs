//! Config redaction: safe-to-print config snapshots.

use serde_json::Value;

use crate::schema::SomarkConfig;

const SENSITIVE_KEYS: &[&str] = &["api_key", "apiKey", "token", "secret", "password"];

fn is_sensitive_key(key: &str) -> bool {
    SENSITIVE_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

/// Redact a config JSON value, masking every sensitive string field.
///
/// Non-empty secrets keep a 4 character prefix as a hint when they are long enough
/// for the prefix not to give the value away.
pub fn redact(value: &Value) -> Value {
    redact_under(value, "")
}

/// Serialize `config` and redact it in one step.
pub fn redacted_config(config: &SomarkConfig) -> Value {
    match serde_json::to_value(config) {
        Ok(value) => redact(&value),
        Err(_) => Value::Null,
    }
}

fn redact_under(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            let hint: String = if s.chars().count() > 12 {
                s.chars().take(4).collect()
            } else {
                String::new()
            };
            Value::String(format!("{hint}***"))
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| redact_under(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_under(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}
