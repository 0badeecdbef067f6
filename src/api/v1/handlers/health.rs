/*
 * Responsibility
 * - GET /health (疎通用, 認証なし)
 */
use axum::{http::StatusCode, response::Response};

use crate::api::response::api_response;

pub async fn health() -> Response {
    api_response("ok", None, StatusCode::OK)
}
