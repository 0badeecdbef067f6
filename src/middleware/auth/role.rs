//! Role-based authorization for a group of routes.
//!
//! Must run after `access`: it reads the `AuthUser` that middleware inserted. A request
//! without one is treated as having no role and is forbidden.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AuthError;
use crate::services::auth::{AuthUser, ClaimKeys, DecodedToken, RolePolicy};
use crate::state::AppState;

/// Required roles of one route group plus the shared role policy.
#[derive(Debug, Clone)]
pub struct RoleGuard {
    policy: Arc<RolePolicy>,
    claim_keys: Arc<ClaimKeys>,
    required: Arc<[String]>,
}

impl RoleGuard {
    pub fn new(state: &AppState, required: &[&str]) -> Self {
        Self {
            policy: state.roles.clone(),
            claim_keys: state.claim_keys.clone(),
            required: required.iter().map(|r| r.to_string()).collect(),
        }
    }

    pub fn check(&self, user: Option<&AuthUser>) -> Result<(), AuthError> {
        let token = DecodedToken::from_user(user, &self.claim_keys);
        self.policy.authorize(token.role(None), &self.required[..])
    }
}

/// Restrict every route of `router` to callers holding one of `roles`.
///
/// Uses `route_layer`, so unmatched paths still fall through to 404.
pub fn require_roles<S>(router: Router<S>, state: &AppState, roles: &[&str]) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let guard = RoleGuard::new(state, roles);
    router.route_layer(middleware::from_fn_with_state(guard, role_middleware))
}

async fn role_middleware(
    State(guard): State<RoleGuard>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    if let Err(err) = guard.check(req.extensions().get::<AuthUser>()) {
        tracing::warn!(
            path = %req.uri().path(),
            required = ?guard.required,
            "request rejected by role guard"
        );
        return Err(err);
    }

    Ok(next.run(req).await)
}
