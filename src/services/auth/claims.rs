//! Decoded claim set and the typed reader used by handlers and the role guard.
//!
//! The claim names are configuration (`ClaimKeys`), so every getter goes through
//! `claim()` instead of a fixed struct layout.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Claims recovered from a verified token.
pub type ClaimSet = Map<String, Value>;

/// Request extension inserted by the access middleware after a successful verification.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthUser(pub ClaimSet);

/// Claim names used to look up well-known fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimKeys {
    pub user_id: String,
    pub user_name: String,
    pub role: String,
    pub roles: String,
    pub expiry: String,
}

impl Default for ClaimKeys {
    fn default() -> Self {
        Self {
            user_id: "sub".to_string(),
            user_name: "name".to_string(),
            role: "role".to_string(),
            roles: "roles".to_string(),
            expiry: "exp".to_string(),
        }
    }
}

/// Look up a single claim by name.
pub fn claim<'a>(claims: &'a ClaimSet, key: &str) -> Option<&'a Value> {
    claims.get(key)
}

/// Read-only view over the claims attached to the current request.
///
/// An absent claim set behaves like an empty one. Each getter takes an optional key
/// that overrides the configured claim name.
#[derive(Debug, Clone, Copy)]
pub struct DecodedToken<'a> {
    claims: Option<&'a ClaimSet>,
    keys: &'a ClaimKeys,
}

impl<'a> DecodedToken<'a> {
    pub fn new(claims: Option<&'a ClaimSet>, keys: &'a ClaimKeys) -> Self {
        Self { claims, keys }
    }

    pub fn from_user(user: Option<&'a AuthUser>, keys: &'a ClaimKeys) -> Self {
        Self::new(user.map(|u| &u.0), keys)
    }

    pub fn data(&self) -> Option<&'a ClaimSet> {
        self.claims
    }

    fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.claims.and_then(|c| claim(c, key))
    }

    /// Subject id. Numeric ids are rendered as strings.
    pub fn user_id(&self, key: Option<&str>) -> Option<String> {
        match self.lookup(key.unwrap_or(&self.keys.user_id))? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn user_name(&self, key: Option<&str>) -> Option<&'a str> {
        self.lookup(key.unwrap_or(&self.keys.user_name))
            .and_then(Value::as_str)
    }

    pub fn role(&self, key: Option<&str>) -> Option<&'a str> {
        self.lookup(key.unwrap_or(&self.keys.role))
            .and_then(Value::as_str)
    }

    /// Role collection. Non-string entries are skipped; a missing claim is empty.
    pub fn roles(&self, key: Option<&str>) -> Vec<&'a str> {
        match self.lookup(key.unwrap_or(&self.keys.roles)) {
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }

    /// Expiry as unix seconds.
    pub fn expires_at(&self, key: Option<&str>) -> Option<i64> {
        self.lookup(key.unwrap_or(&self.keys.expiry))
            .and_then(Value::as_i64)
    }

    pub fn expires_at_utc(&self, key: Option<&str>) -> Option<DateTime<Utc>> {
        self.expires_at(key)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn claims(value: Value) -> ClaimSet {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test claims must be an object"),
        }
    }

    #[test]
    fn reads_well_known_claims_with_default_keys() {
        let set = claims(json!({
            "sub": 42,
            "name": "Ada",
            "role": "admin",
            "roles": ["admin", "editor", 7],
            "exp": 1_700_000_000,
        }));
        let keys = ClaimKeys::default();
        let token = DecodedToken::new(Some(&set), &keys);

        assert_eq!(token.user_id(None).as_deref(), Some("42"));
        assert_eq!(token.user_name(None), Some("Ada"));
        assert_eq!(token.role(None), Some("admin"));
        assert_eq!(token.roles(None), vec!["admin", "editor"]);
        assert_eq!(token.expires_at(None), Some(1_700_000_000));
        assert_eq!(
            token.expires_at_utc(None).map(|t| t.timestamp()),
            Some(1_700_000_000)
        );
    }

    #[test]
    fn configured_keys_redirect_lookups() {
        let set = claims(json!({ "uid": "u-1", "group": "editor" }));
        let keys = ClaimKeys {
            user_id: "uid".into(),
            role: "group".into(),
            ..ClaimKeys::default()
        };
        let token = DecodedToken::new(Some(&set), &keys);

        assert_eq!(token.user_id(None).as_deref(), Some("u-1"));
        assert_eq!(token.role(None), Some("editor"));
        assert_eq!(token.role(Some("role")), None);
    }

    #[test]
    fn absent_claim_set_reads_as_empty() {
        let keys = ClaimKeys::default();
        let token = DecodedToken::from_user(None, &keys);

        assert!(token.data().is_none());
        assert_eq!(token.user_id(None), None);
        assert_eq!(token.role(None), None);
        assert!(token.roles(None).is_empty());
        assert_eq!(token.expires_at(None), None);
    }

    #[test]
    fn non_string_role_is_ignored() {
        let set = claims(json!({ "role": 1 }));
        let keys = ClaimKeys::default();
        assert_eq!(DecodedToken::new(Some(&set), &keys).role(None), None);
    }
}
