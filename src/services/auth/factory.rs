/// Factory: build the configured `TokenVerifier` from `AuthPolicy`.
use std::sync::Arc;

use tracing::error;

use crate::config::{AuthPolicy, TokenMode};
use crate::error::AppError;
use crate::services::auth::{
    TokenVerifier, encrypted::EncryptedTokenVerifier, signed::SignedTokenVerifier,
};

pub fn build_verifier(policy: &AuthPolicy) -> Result<Arc<dyn TokenVerifier>, AppError> {
    let verifier: Arc<dyn TokenVerifier> = match policy.mode {
        TokenMode::Signed => Arc::new(
            SignedTokenVerifier::new(&policy.secret, policy.algorithm, policy.leeway_seconds)
                .map_err(|e| {
                    error!(error = %e, "failed to build signed token verifier");
                    AppError::Internal
                })?,
        ),
        TokenMode::Encrypted => Arc::new(EncryptedTokenVerifier::new(&policy.secret).map_err(
            |e| {
                error!(error = %e, "failed to build encrypted token verifier");
                AppError::Internal
            },
        )?),
    };

    Ok(verifier)
}
