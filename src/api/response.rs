/*
 * Responsibility
 * - Common JSON envelope: {status: "<code> <reason>", message, ...data}
 * - Split of paginated envelopes into (items, metadata)
 * - handle_errors: run a fallible operation and convert failures into the envelope
 */
use std::future::Future;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::ErrorStatus;

const DEFAULT_ERROR_MESSAGE: &str = "Something went wrong";

/// Build the response body.
///
/// Object data is merged into the envelope (data keys win on collision). Other
/// non-null values are placed under `data`.
pub fn api_body(message: &str, data: Option<Value>, status: StatusCode) -> Value {
    let reason = status.canonical_reason().unwrap_or("Unknown status");

    let mut body = Map::new();
    body.insert(
        "status".to_string(),
        Value::String(format!("{} {}", status.as_u16(), reason)),
    );
    body.insert("message".to_string(), Value::String(message.to_string()));

    match data {
        None | Some(Value::Null) => {}
        Some(Value::Object(fields)) => body.extend(fields),
        Some(other) => {
            body.insert("data".to_string(), other);
        }
    }

    Value::Object(body)
}

pub fn api_response(message: &str, data: Option<Value>, status: StatusCode) -> Response {
    (status, Json(api_body(message, data, status))).into_response()
}

/// Split a paginated envelope into its `data` items and the remaining metadata.
///
/// A missing `data` field yields `null` items.
pub fn paginated_response<T: Serialize>(response: &T) -> serde_json::Result<(Value, Value)> {
    match serde_json::to_value(response)? {
        Value::Object(mut fields) => {
            let items = fields.remove("data").unwrap_or(Value::Null);
            Ok((items, Value::Object(fields)))
        }
        other => Ok((Value::Null, other)),
    }
}

/// Run `op`, returning its response on success and an error envelope on failure.
///
/// The status comes from the error's `ErrorStatus` (500 when it has none).
pub async fn handle_errors<F, Fut, T, E>(op: F, error_message: Option<&str>) -> Response
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    T: IntoResponse,
    E: ErrorStatus,
{
    match op().await {
        Ok(value) => value.into_response(),
        Err(err) => {
            let status = err
                .status_code()
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            tracing::debug!(error = %err, status = status.as_u16(), "request failed");
            api_response(
                error_message.unwrap_or(DEFAULT_ERROR_MESSAGE),
                Some(json!({ "error": err.to_string() })),
                status,
            )
        }
    }
}
