//! Encrypted token (compact JWE, `dir` + `A256GCM`) handling backed by `josekit`.
//!
//! The token is opaque to clients: only holders of the shared key can read or mint it.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use josekit::{
    JoseError,
    jwe::{
        self, Dir, JweHeader,
        alg::direct::{DirectJweDecrypter, DirectJweEncrypter},
    },
};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::error::AuthError;
use crate::services::auth::claims::ClaimSet;
use crate::services::auth::verifier::TokenVerifier;

const CONTENT_ENCRYPTION: &str = "A256GCM";
const KEY_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum EncryptionKeyError {
    #[error("invalid base64 key: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("encryption key must be 32 bytes, got {0}")]
    Length(usize),
    #[error("jose error: {0}")]
    Jose(#[from] JoseError),
}

#[derive(Debug, thiserror::Error)]
pub enum SealError {
    #[error("failed to serialize claims: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to encrypt claims: {0}")]
    Jose(#[from] JoseError),
}

/// Derive the content-encryption key from the configured secret.
///
/// `base64:<key>` is decoded as-is (32 bytes); any other secret is hashed with SHA-256.
pub fn derive_key(secret: &str) -> Result<Vec<u8>, EncryptionKeyError> {
    match secret.strip_prefix("base64:") {
        Some(encoded) => {
            let key = STANDARD.decode(encoded.trim())?;
            if key.len() != KEY_LEN {
                return Err(EncryptionKeyError::Length(key.len()));
            }
            Ok(key)
        }
        None => Ok(Sha256::digest(secret.as_bytes()).to_vec()),
    }
}

/// Seals and opens encrypted claim tokens.
///
/// - Key material is intentionally not printable via Debug.
pub struct EncryptedTokenVerifier {
    encrypter: DirectJweEncrypter,
    decrypter: DirectJweDecrypter,
}

impl std::fmt::Debug for EncryptedTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedTokenVerifier")
            .field("alg", &"dir")
            .field("enc", &CONTENT_ENCRYPTION)
            .finish()
    }
}

impl EncryptedTokenVerifier {
    pub fn new(secret: &str) -> Result<Self, EncryptionKeyError> {
        let key = derive_key(secret)?;

        Ok(Self {
            encrypter: Dir.encrypter_from_bytes(&key)?,
            decrypter: Dir.decrypter_from_bytes(&key)?,
        })
    }

    /// Encrypt a claim set into a compact JWE.
    ///
    /// The payload is the plain JSON object, so claim values keep whatever type they have
    /// (a numeric `sub` stays numeric).
    pub fn seal(&self, claims: &ClaimSet) -> Result<String, SealError> {
        let mut header = JweHeader::new();
        header.set_token_type("JWT");
        header.set_content_encryption(CONTENT_ENCRYPTION);

        let payload = serde_json::to_vec(claims)?;
        Ok(jwe::serialize_compact(&payload, &header, &self.encrypter)?)
    }
}

impl TokenVerifier for EncryptedTokenVerifier {
    fn verify(&self, token: &str) -> Result<ClaimSet, AuthError> {
        let (payload, _header) =
            jwe::deserialize_compact(token, &self.decrypter).map_err(|err| {
                warn!(error = %err, "encrypted token decryption failed");
                AuthError::DecryptionFailed
            })?;

        serde_json::from_slice::<ClaimSet>(&payload).map_err(|err| {
            warn!(error = %err, "decrypted token payload is not a JSON object");
            AuthError::DecryptionFailed
        })
    }
}
