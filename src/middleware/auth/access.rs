//! Bearer token verification → `AuthUser` in request extensions.
//!
//! - `Authorization: Bearer <token>` (the prefix is optional)
//! - verification is delegated to the `TokenVerifier` chosen at start-up
//! - any failure ends the request here; handlers never see an unverified request

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::error::AuthError;
use crate::services::auth::AuthUser;
use crate::state::AppState;

/// Apply token authentication to every route of `router`.
///
/// ```ignore
/// let v1 = middleware::auth::access::apply(api::v1::routes(&state), state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply<S>(router: Router<S>, state: AppState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

/// Extract the credential from the `Authorization` header, dropping a `Bearer ` prefix.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .ok_or(AuthError::MissingCredential)?;

    Ok(value.strip_prefix("Bearer ").unwrap_or(value))
}

/// Verify the request's credential and return the user to attach.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<AuthUser, AuthError> {
    let token = bearer_token(headers)?;
    state.verifier.verify(token).map(AuthUser)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let user = match authenticate(&state, req.headers()) {
        Ok(user) => user,
        Err(err) => {
            tracing::warn!(error = %err, path = %req.uri().path(), "request rejected by access middleware");
            return Err(err);
        }
    };

    // middleware → extractor / role guard への受け渡し
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_missing_credential() {
        assert_eq!(
            bearer_token(&HeaderMap::new()),
            Err(AuthError::MissingCredential)
        );
    }

    #[test]
    fn empty_header_is_missing_credential() {
        assert_eq!(bearer_token(&headers("")), Err(AuthError::MissingCredential));
    }

    #[test]
    fn bearer_prefix_is_stripped() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
    }

    #[test]
    fn bare_token_is_tolerated() {
        assert_eq!(bearer_token(&headers("abc.def.ghi")), Ok("abc.def.ghi"));
    }
}
