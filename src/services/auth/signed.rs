//! Signed JWT (JWS) verification backed by `jsonwebtoken`.

use std::collections::HashSet;

use jsonwebtoken::{Algorithm, DecodingKey, Validation, errors::ErrorKind};
use tracing::warn;

use crate::error::AuthError;
use crate::services::auth::claims::ClaimSet;
use crate::services::auth::verifier::TokenVerifier;

#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("invalid key material for {alg:?}: {source}")]
    InvalidKey {
        alg: Algorithm,
        source: jsonwebtoken::errors::Error,
    },
}

/// Verifies signature, `exp` and `nbf` of compact JWS tokens.
///
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct SignedTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for SignedTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedTokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl SignedTokenVerifier {
    /// HMAC algorithms take `secret` as raw bytes; asymmetric ones expect a PEM public key.
    pub fn new(secret: &str, algorithm: Algorithm, leeway_seconds: u64) -> Result<Self, KeyError> {
        let decoding_key = decoding_key(secret, algorithm)
            .map_err(|source| KeyError::InvalidKey { alg: algorithm, source })?;

        let mut validation = Validation::new(algorithm);
        validation.leeway = leeway_seconds;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // Tokens without `exp` are accepted; audience is not part of this policy.
        validation.required_spec_claims = HashSet::new();
        validation.validate_aud = false;

        Ok(Self {
            decoding_key,
            validation,
        })
    }
}

fn decoding_key(
    secret: &str,
    algorithm: Algorithm,
) -> Result<DecodingKey, jsonwebtoken::errors::Error> {
    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
            Ok(DecodingKey::from_secret(secret.as_bytes()))
        }
        Algorithm::RS256
        | Algorithm::RS384
        | Algorithm::RS512
        | Algorithm::PS256
        | Algorithm::PS384
        | Algorithm::PS512 => DecodingKey::from_rsa_pem(secret.as_bytes()),
        Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(secret.as_bytes()),
        Algorithm::EdDSA => DecodingKey::from_ed_pem(secret.as_bytes()),
    }
}

fn classify(err: &jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::InvalidSignature => AuthError::SignatureInvalid,
        ErrorKind::ExpiredSignature => AuthError::Expired,
        ErrorKind::ImmatureSignature => AuthError::NotYetValid,
        _ => AuthError::MalformedOrUnknown,
    }
}

impl TokenVerifier for SignedTokenVerifier {
    fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        jsonwebtoken::decode::<ClaimSet>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                warn!(error = %err, "signed token verification failed");
                classify(&err)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header};
    use serde_json::{Value, json};

    const SECRET: &str = "unit-test-secret";

    fn sign(claims: &Value, secret: &str) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn verifier() -> SignedTokenVerifier {
        SignedTokenVerifier::new(SECRET, Algorithm::HS256, 0).unwrap()
    }

    #[test]
    fn valid_token_round_trips_claims() {
        let claims = json!({
            "sub": "42",
            "name": "Ada",
            "role": "admin",
            "roles": ["admin", "editor"],
            "exp": Utc::now().timestamp() + 3600,
        });

        let decoded = verifier().verify(&sign(&claims, SECRET)).unwrap();
        assert_eq!(Value::Object(decoded), claims);
    }

    #[test]
    fn token_without_exp_is_accepted() {
        let claims = json!({ "sub": "1", "role": "viewer" });
        let decoded = verifier().verify(&sign(&claims, SECRET)).unwrap();
        assert_eq!(Value::Object(decoded), claims);
    }

    #[test]
    fn wrong_secret_is_signature_invalid() {
        let token = sign(&json!({ "sub": "1" }), "another-secret");
        assert_eq!(verifier().verify(&token), Err(AuthError::SignatureInvalid));
    }

    #[test]
    fn tampered_payload_is_signature_invalid() {
        let token = sign(&json!({ "sub": "1", "role": "viewer" }), SECRET);
        let parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(br#"{"sub":"1","role":"admin"}"#);
        let tampered = format!("{}.{}.{}", parts[0], forged, parts[2]);

        assert_eq!(verifier().verify(&tampered), Err(AuthError::SignatureInvalid));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = sign(
            &json!({ "sub": "1", "exp": Utc::now().timestamp() - 3600 }),
            SECRET,
        );
        assert_eq!(verifier().verify(&token), Err(AuthError::Expired));
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let token = sign(
            &json!({ "sub": "1", "exp": Utc::now().timestamp() - 10 }),
            SECRET,
        );
        let lenient = SignedTokenVerifier::new(SECRET, Algorithm::HS256, 120).unwrap();
        assert!(lenient.verify(&token).is_ok());
    }

    #[test]
    fn future_nbf_is_not_yet_valid() {
        let now = Utc::now().timestamp();
        let token = sign(
            &json!({ "sub": "1", "nbf": now + 3600, "exp": now + 7200 }),
            SECRET,
        );
        assert_eq!(verifier().verify(&token), Err(AuthError::NotYetValid));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            verifier().verify("not-a-jwt"),
            Err(AuthError::MalformedOrUnknown)
        );
    }

    #[test]
    fn algorithm_mismatch_is_malformed() {
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS512),
            &json!({ "sub": "1" }),
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_eq!(verifier().verify(&token), Err(AuthError::MalformedOrUnknown));
    }

    #[test]
    fn invalid_pem_is_rejected_at_construction() {
        assert!(SignedTokenVerifier::new("not a pem", Algorithm::RS256, 0).is_err());
    }
}
