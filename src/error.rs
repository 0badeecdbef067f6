/*
 * Responsibility
 * - Application-wide error types (AppError / AuthError)
 * - IntoResponse implementations (HTTP status / JSON body)
 * - ErrorStatus: the status code an error maps to, used by handle_errors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::api::response::api_response;

/// Errors that carry their own HTTP status.
///
/// `None` means the error has no specific status and is reported as 500.
pub trait ErrorStatus: std::fmt::Display {
    fn status_code(&self) -> Option<StatusCode> {
        None
    }
}

impl ErrorStatus for anyhow::Error {}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{resource} not found.")]
    NotFound { resource: &'static str },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl ErrorStatus for AppError {
    fn status_code(&self) -> Option<StatusCode> {
        Some(match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self
            .status_code()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        api_response(&self.to_string(), None, status)
    }
}

/// Failures of the authentication and authorization stages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Authentication credentials are missing.")]
    MissingCredential,
    #[error(
        "We could not verify your session. Please contact an administrator or try again later."
    )]
    SignatureInvalid,
    #[error("Your login session has expired. Please log in again.")]
    Expired,
    #[error("Your login session is not yet active.")]
    NotYetValid,
    #[error("An error occurred while validating your session. Please try again later.")]
    MalformedOrUnknown,
    #[error("Invalid token")]
    DecryptionFailed,
    #[error("{0}")]
    RoleForbidden(String),
}

impl ErrorStatus for AuthError {
    fn status_code(&self) -> Option<StatusCode> {
        Some(match self {
            AuthError::MissingCredential
            | AuthError::Expired
            | AuthError::NotYetValid
            | AuthError::DecryptionFailed => StatusCode::UNAUTHORIZED,
            // A bad signature points at key/config drift rather than a client mistake.
            AuthError::SignatureInvalid | AuthError::MalformedOrUnknown => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AuthError::RoleForbidden(_) => StatusCode::FORBIDDEN,
        })
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self
            .status_code()
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = self.to_string();

        match self {
            AuthError::MissingCredential | AuthError::DecryptionFailed => {
                (status, Json(json!({ "error": message }))).into_response()
            }
            AuthError::SignatureInvalid
            | AuthError::Expired
            | AuthError::NotYetValid
            | AuthError::MalformedOrUnknown => {
                (status, Json(json!({ "token": message }))).into_response()
            }
            AuthError::RoleForbidden(_) => api_response(&message, None, status),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(res: Response) -> Value {
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn missing_credential_uses_error_key() {
        let res = AuthError::MissingCredential.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(res).await,
            json!({ "error": "Authentication credentials are missing." })
        );
    }

    #[tokio::test]
    async fn verification_failures_use_token_key() {
        let cases = [
            (AuthError::SignatureInvalid, StatusCode::INTERNAL_SERVER_ERROR),
            (AuthError::Expired, StatusCode::UNAUTHORIZED),
            (AuthError::NotYetValid, StatusCode::UNAUTHORIZED),
            (AuthError::MalformedOrUnknown, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            let message = err.to_string();
            let res = err.into_response();
            assert_eq!(res.status(), status);
            assert_eq!(body_json(res).await, json!({ "token": message }));
        }
    }

    #[tokio::test]
    async fn role_forbidden_uses_api_response_shape() {
        let res = AuthError::RoleForbidden("nope".into()).into_response();
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
        assert_eq!(
            body_json(res).await,
            json!({ "status": "403 Forbidden", "message": "nope" })
        );
    }

    #[tokio::test]
    async fn app_error_renders_status_line() {
        let res = AppError::not_found("user").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            body_json(res).await,
            json!({ "status": "404 Not Found", "message": "user not found." })
        );
    }

    #[test]
    fn app_error_variants_carry_statuses() {
        assert_eq!(
            AppError::bad_request("x").status_code(),
            Some(StatusCode::BAD_REQUEST)
        );
        assert_eq!(
            AppError::not_found("x").status_code(),
            Some(StatusCode::NOT_FOUND)
        );
        assert_eq!(
            AppError::Internal.status_code(),
            Some(StatusCode::INTERNAL_SERVER_ERROR)
        );
    }

    #[test]
    fn anyhow_errors_have_no_status() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(err.status_code(), None);
    }
}
