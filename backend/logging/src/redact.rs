//! Log Redaction Layer
//!
//! Scrubs API keys and access tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static GOOGLE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AIza[0-9A-Za-z_\-]{35}").unwrap());
static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9_\-]{20,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)").unwrap()
});
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&]key=)[^&\s]+").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = KEY_PARAM_RE.replace_all(input, "${1}[REDACTED]");
    let redacted = GOOGLE_KEY_RE.replace_all(&redacted, "[REDACTED_TOKEN]");
    API_KEY_RE.replace_all(&redacted, "[REDACTED_TOKEN]").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "POST https://example.test/v1/models/x?key=secret123&alt=json with Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("secret123"));
        assert!(clean.contains("?key=[REDACTED]&alt=json"));
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
    }

    #[test]
    fn redacts_google_and_openai_keys() {
        let google = format!("AIza{}", "A".repeat(35));
        let clean = redact_sensitive_data(&format!("gemini key {google}, openai sk-abcdefghijklmnopqrstuvwx"));
        assert_eq!(clean, "gemini key [REDACTED_TOKEN], openai [REDACTED_TOKEN]");
    }

    #[test]
    fn leaves_analysis_text_alone() {
        let text = "🌍 **Verdict: Fisherman's Bastion, Budapest, Hungary (98% confidence)**";
        assert_eq!(redact_sensitive_data(text), text);
    }
}
