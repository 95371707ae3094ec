//! Log redaction for credential-bearing values.
//!
//! Every structured value that reaches a log line goes through [`redacted`]
//! first. Matching is by field name, recursive, and ignores case and
//! `_`/`-` separators so the camelCase wire forms and the snake_case
//! internal forms are both caught.

use serde_json::Value;

/// Replacement text for redacted values
pub const REDACTED: &str = "[REDACTED]";

/// Normalized field names whose values never reach a log line.
const SENSITIVE_KEYS: &[&str] = &["clientsecret", "accesstoken", "clientid", "accountnumber"];

/// Returns a copy of `value` with every sensitive field replaced, however
/// deeply nested in objects or arrays.
#[must_use]
pub fn redacted(value: &Value) -> Value {
    let mut out = value.clone();
    redact_in_place(&mut out);
    out
}

/// In-place variant of [`redacted`].
pub fn redact_in_place(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if is_sensitive(key) {
                    *entry = Value::String(REDACTED.to_string());
                } else {
                    redact_in_place(entry);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter_mut() {
                redact_in_place(item);
            }
        }
        _ => {}
    }
}

fn is_sensitive(key: &str) -> bool {
    let normalized: String = key
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect();
    SENSITIVE_KEYS.contains(&normalized.as_str())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn redacts_top_level_credential_fields() {
        let value = json!({
            "clientId": "id-123",
            "clientSecret": "s3cret",
            "country": "US"
        });
        assert_eq!(
            redacted(&value),
            json!({
                "clientId": "[REDACTED]",
                "clientSecret": "[REDACTED]",
                "country": "US"
            })
        );
    }

    #[test]
    fn redacts_nested_objects_and_arrays() {
        let value = json!({
            "accountNumber": { "value": "123456789" },
            "requests": [
                { "access_token": "tok-1" },
                { "payload": { "client_secret": "tok-2" } }
            ]
        });
        let clean = redacted(&value);
        assert_eq!(clean.pointer("/accountNumber"), Some(&json!("[REDACTED]")));
        assert_eq!(
            clean.pointer("/requests/0/access_token"),
            Some(&json!("[REDACTED]"))
        );
        assert_eq!(
            clean.pointer("/requests/1/payload/client_secret"),
            Some(&json!("[REDACTED]"))
        );
    }

    #[test]
    fn key_matching_ignores_case_and_separators() {
        assert!(is_sensitive("clientSecret"));
        assert!(is_sensitive("client_secret"));
        assert!(is_sensitive("CLIENT-SECRET"));
        assert!(is_sensitive("accessToken"));
        assert!(is_sensitive("access_token"));
        assert!(is_sensitive("accountNumber"));
        assert!(is_sensitive("clientId"));
        assert!(!is_sensitive("client"));
        assert!(!is_sensitive("secret_sauce"));
        assert!(!is_sensitive("account"));
    }

    #[test]
    fn non_sensitive_values_survive_untouched() {
        let value = json!({
            "collection": "posters",
            "size": "a2",
            "postalCode": "10001",
            "rates": [{ "cost": 12.5, "currency": "USD" }]
        });
        assert_eq!(redacted(&value), value);
    }

    #[test]
    fn redaction_replaces_whole_subtrees() {
        // A wrapped account number must not leak through its inner value.
        let value = json!({ "accountNumber": { "value": "987654321" } });
        let clean = redacted(&value);
        assert!(!clean.to_string().contains("987654321"));
    }
}
