/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - verifier: 起動時に選んだ TokenVerifier (signed / encrypted)
 *   - claim_keys / roles: 起動時に読み込んだ read-only の policy
 * - Clone 前提で持つ (内部は Arc で cheap)
 */
use std::sync::Arc;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{ClaimKeys, RolePolicy, TokenVerifier, build_verifier};

#[derive(Clone, Debug)]
pub struct AppState {
    pub verifier: Arc<dyn TokenVerifier>,
    pub claim_keys: Arc<ClaimKeys>,
    pub roles: Arc<RolePolicy>,
}

impl AppState {
    pub fn new(
        verifier: Arc<dyn TokenVerifier>,
        claim_keys: ClaimKeys,
        roles: RolePolicy,
    ) -> Self {
        Self {
            verifier,
            claim_keys: Arc::new(claim_keys),
            roles: Arc::new(roles),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let verifier = build_verifier(&config.auth)?;
        Ok(Self::new(
            verifier,
            config.auth.claim_keys.clone(),
            config.roles.clone(),
        ))
    }
}
