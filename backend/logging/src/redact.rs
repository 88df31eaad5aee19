//! Log Redaction Layer
//!
//! Scrubs API keys and bearer tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());
static SK_KEY_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"sk-[a-zA-Z0-9]{32,}").unwrap());
// `api_key=...`, `"api_key": "..."` and `apiKey: ...`
static API_KEY_FIELD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)("?api_?key"?\s*[:=]\s*"?)([^"\s,&}]+)"#).unwrap()
});

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = BEARER_RE.replace_all(input, "[REDACTED_TOKEN]");
    let redacted = SK_KEY_RE.replace_all(&redacted, "[REDACTED_TOKEN]");
    API_KEY_FIELD_RE
        .replace_all(&redacted, "${1}[REDACTED]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "Sending with Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
    }

    #[test]
    fn redacts_api_key_fields() {
        let clean = redact_sensitive_data(r#"{"api_key": "abc123", "format": "both"}"#);
        assert!(!clean.contains("abc123"));
        assert!(clean.contains("\"format\": \"both\""));

        let clean = redact_sensitive_data("url?apiKey=xyz789&x=1");
        assert!(!clean.contains("xyz789"));
        assert!(clean.contains("&x=1"));
    }

    #[test]
    fn leaves_plain_text_untouched() {
        let raw = "Extracting invoice.pdf as markdown";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
