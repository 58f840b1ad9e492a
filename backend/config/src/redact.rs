//! Config redaction: safe-to-print config snapshots with secrets masked.

use serde_json::Value;

/// Keys whose string values are secrets.
static SECRET_KEYS: &[&str] = &["apiKey", "api_key", "token", "secret", "password"];

/// Redact a config JSON value, replacing sensitive fields with a short hint.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

fn is_sensitive_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_sensitive_key(key) && !s.is_empty() => {
            // First 4 chars are enough to tell keys apart.
            let hint: String = s.chars().take(4).collect();
            if s.chars().count() > 8 {
                Value::String(format!("{hint}***"))
            } else {
                Value::String("***".to_string())
            }
        }
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), redact_recursive(v, k)))
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_api_key() {
        let v = json!({"analyzer": {"provider": "gemini", "apiKey": "AIzaSyExampleExample"}});
        let out = redact(&v);
        assert_eq!(out["analyzer"]["apiKey"], "AIza***");
        assert_eq!(out["analyzer"]["provider"], "gemini");
    }

    #[test]
    fn short_secrets_are_fully_hidden() {
        let out = redact(&json!({"apiKey": "abc"}));
        assert_eq!(out["apiKey"], "***");
    }

    #[test]
    fn other_values_untouched() {
        let v = json!({"server": {"port": 3000, "bind": "127.0.0.1"}});
        assert_eq!(redact(&v), v);
    }
}
