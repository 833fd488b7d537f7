use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const USER_ID_ALIASES: [&str; 4] = ["user_id", "id", "sub", "uid"];
const USERNAME_ALIASES: [&str; 4] = ["username", "name", "user", "login"];
const EMAIL_ALIASES: [&str; 2] = ["email", "mail"];

/// A user profile normalized into a backend-agnostic shape.
///
/// The three canonical fields are always present when serialized, holding
/// [`Value::Null`] when the source had nothing to offer. Every raw field not
/// named by a canonical key is carried through unmodified in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalProfile {
    #[serde(default)]
    pub user_id: Value,

    #[serde(default)]
    pub username: Value,

    #[serde(default)]
    pub email: Value,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CanonicalProfile {
    /// Normalizes an arbitrary decoded profile payload.
    ///
    /// Each canonical field takes the first non-null value among its aliases.
    /// Since every alias list leads with the canonical name itself, this
    /// transformation is idempotent. Non-object payloads normalize to the
    /// all-null profile.
    pub fn normalize(raw: Value) -> Self {
        let mut extra = match raw {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };

        let user_id = pick(&extra, &USER_ID_ALIASES);
        let username = pick(&extra, &USERNAME_ALIASES);
        let email = pick(&extra, &EMAIL_ALIASES);

        // Canonical keys always carry the computed value, a raw collision
        // must not produce a duplicate key when serializing.
        extra.remove("user_id");
        extra.remove("username");
        extra.remove("email");

        Self {
            user_id,
            username,
            email,
            extra,
        }
    }
}

fn pick(fields: &Map<String, Value>, aliases: &[&str]) -> Value {
    for alias in aliases {
        match fields.get(*alias) {
            Some(Value::Null) | None => continue,
            Some(value) => return value.clone(),
        }
    }
    Value::Null
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalize_aliases() {
        let profile = CanonicalProfile::normalize(json!({"id": 7, "name": "Bob"}));
        assert_eq!(profile.user_id, json!(7));
        assert_eq!(profile.username, json!("Bob"));
        assert_eq!(profile.email, Value::Null);
        assert_eq!(profile.extra.get("id"), Some(&json!(7)));
        assert_eq!(profile.extra.get("name"), Some(&json!("Bob")));
    }

    #[test]
    fn test_normalize_alias_priority() {
        let profile = CanonicalProfile::normalize(json!({
            "sub": "3",
            "id": 7,
            "user": "bob",
            "username": "alice",
            "mail": "a@b.c",
        }));
        assert_eq!(profile.user_id, json!(7));
        assert_eq!(profile.username, json!("alice"));
        assert_eq!(profile.email, json!("a@b.c"));
    }

    #[test]
    fn test_normalize_skips_null_aliases() {
        let profile = CanonicalProfile::normalize(json!({
            "user_id": null,
            "id": 42,
            "email": null,
        }));
        assert_eq!(profile.user_id, json!(42));
        assert_eq!(profile.email, Value::Null);
    }

    #[test]
    fn test_normalize_preserves_unknown_fields() {
        let profile = CanonicalProfile::normalize(json!({
            "id": 1,
            "avatar": "a.png",
            "roles": ["admin"],
        }));
        assert_eq!(profile.extra.get("avatar"), Some(&json!("a.png")));
        assert_eq!(profile.extra.get("roles"), Some(&json!(["admin"])));
    }

    #[test]
    fn test_normalize_canonical_key_collision() {
        // The computed value wins over the raw field, no duplicate keys.
        let profile = CanonicalProfile::normalize(json!({
            "user_id": 1,
            "id": 2,
        }));
        assert_eq!(profile.user_id, json!(1));
        assert!(!profile.extra.contains_key("user_id"));
        assert_eq!(profile.extra.get("id"), Some(&json!(2)));
    }

    #[test]
    fn test_normalize_idempotent() {
        let profile = CanonicalProfile::normalize(json!({
            "id": 7,
            "name": "Bob",
            "avatar": "a.png",
        }));
        let value = serde_json::to_value(&profile).unwrap();
        let again = CanonicalProfile::normalize(value);
        assert_eq!(profile, again);
    }

    #[test]
    fn test_normalize_non_object() {
        let profile = CanonicalProfile::normalize(json!([1, 2, 3]));
        assert_eq!(profile.user_id, Value::Null);
        assert_eq!(profile.username, Value::Null);
        assert_eq!(profile.email, Value::Null);
        assert!(profile.extra.is_empty());
    }

    #[test]
    fn test_serialize_keeps_canonical_keys() {
        let profile = CanonicalProfile::normalize(json!({}));
        let value = serde_json::to_value(&profile).unwrap();
        let fields = value.as_object().unwrap();
        assert_eq!(fields.get("user_id"), Some(&Value::Null));
        assert_eq!(fields.get("username"), Some(&Value::Null));
        assert_eq!(fields.get("email"), Some(&Value::Null));
    }
}
