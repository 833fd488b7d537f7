use serde_json::Value;

/// Token fields checked in the login response, in priority order. Different
/// backends name the field differently, so we accept all known conventions.
const TOKEN_FIELDS: [&str; 3] = ["access_token", "jwt", "token"];

/// Extracts the access token from a decoded login response.
///
/// The first field from [`TOKEN_FIELDS`] holding a non-empty string wins.
/// Returns [`None`] if no field qualifies. The token content itself is never
/// validated, it is treated as an opaque credential.
pub fn extract_token(resp: &Value) -> Option<&str> {
    let fields = resp.as_object()?;
    for name in TOKEN_FIELDS {
        if let Some(Value::String(token)) = fields.get(name) {
            if !token.is_empty() {
                return Some(token);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extract_token_priority() {
        let resp = json!({
            "token": "t2",
            "jwt": "t1",
            "access_token": "t0",
        });
        assert_eq!(extract_token(&resp), Some("t0"));

        let resp = json!({"jwt": "t1", "token": "t2"});
        assert_eq!(extract_token(&resp), Some("t1"));

        let resp = json!({"token": "t2", "token_type": "bearer"});
        assert_eq!(extract_token(&resp), Some("t2"));
    }

    #[test]
    fn test_extract_token_ignores_other_fields() {
        let resp = json!({
            "access_token": "t0",
            "dashboard": "/dashboard.html",
            "token_type": "bearer",
        });
        assert_eq!(extract_token(&resp), Some("t0"));
    }

    #[test]
    fn test_extract_token_absent() {
        assert_eq!(extract_token(&json!({})), None);
        assert_eq!(extract_token(&json!({"token_type": "bearer"})), None);
        assert_eq!(extract_token(&json!("not an object")), None);
        assert_eq!(extract_token(&json!(null)), None);
    }

    #[test]
    fn test_extract_token_skips_empty_and_non_string() {
        let resp = json!({"access_token": "", "jwt": "t1"});
        assert_eq!(extract_token(&resp), Some("t1"));

        let resp = json!({"access_token": 123, "token": "t2"});
        assert_eq!(extract_token(&resp), Some("t2"));

        let resp = json!({"access_token": "", "jwt": null, "token": ""});
        assert_eq!(extract_token(&resp), None);
    }
}
