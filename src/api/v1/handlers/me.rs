/*
 * Responsibility
 * - GET /me: 認証済み caller の claims を返す
 * - claim 名は設定 (ClaimKeys) に従って読む
 */
use axum::{http::StatusCode, response::Response};
use serde_json::json;

use crate::api::response::{api_response, handle_errors};
use crate::api::v1::{dto::me::MeResponse, extractors::AuthCtxExtractor};
use crate::error::AppError;

pub async fn me(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Response {
    handle_errors(
        || async move {
            let token = ctx.token();
            let id = token
                .user_id(None)
                .ok_or_else(|| AppError::bad_request("token has no subject"))?;

            let body = MeResponse {
                id,
                name: token.user_name(None).map(str::to_string),
                role: token.role(None).map(str::to_string),
                roles: token.roles(None).into_iter().map(str::to_string).collect(),
                expires_at: token.expires_at_utc(None),
            };

            Ok::<_, AppError>(api_response(
                "Authenticated",
                Some(json!({ "user": body })),
                StatusCode::OK,
            ))
        },
        Some("Could not read the current session"),
    )
    .await
}
