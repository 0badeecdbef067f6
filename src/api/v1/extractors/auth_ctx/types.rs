/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証した claims と、起動時に決めた claim 名をまとめて持つ
 */
use std::sync::Arc;

use crate::services::auth::{ClaimKeys, ClaimSet, DecodedToken};

/// Claims of the authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub claims: ClaimSet,
    keys: Arc<ClaimKeys>,
}

impl AuthCtx {
    pub fn new(claims: ClaimSet, keys: Arc<ClaimKeys>) -> Self {
        Self { claims, keys }
    }

    pub fn token(&self) -> DecodedToken<'_> {
        DecodedToken::new(Some(&self.claims), &self.keys)
    }
}
