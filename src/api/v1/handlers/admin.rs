/*
 * Responsibility
 * - GET /admin (role: admin)
 */
use axum::{http::StatusCode, response::Response};
use serde_json::json;

use crate::api::response::api_response;
use crate::api::v1::extractors::AuthCtxExtractor;

pub async fn admin_dashboard(AuthCtxExtractor(ctx): AuthCtxExtractor) -> Response {
    let token = ctx.token();
    api_response(
        "Welcome to the admin area",
        Some(json!({ "user": token.user_name(None), "role": token.role(None) })),
        StatusCode::OK,
    )
}
