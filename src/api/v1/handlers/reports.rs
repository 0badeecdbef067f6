/*
 * Responsibility
 * - GET /reports (role: admin / editor)
 * - Query を DTO で受けて validation → paginated envelope を items と pagination に分けて返す
 */
use axum::{
    extract::{Query, rejection::QueryRejection},
    http::StatusCode,
    response::Response,
};
use serde_json::json;

use crate::api::response::{api_response, handle_errors};
use crate::api::v1::dto::reports::{PageQuery, Paginated, Report};
use crate::error::AppError;

fn catalog() -> Vec<Report> {
    ["Daily sales", "Weekly signups", "Monthly churn", "Quarterly revenue"]
        .iter()
        .enumerate()
        .map(|(i, title)| Report {
            id: i as u32 + 1,
            title: title.to_string(),
        })
        .collect()
}

pub async fn list_reports(query: Result<Query<PageQuery>, QueryRejection>) -> Response {
    handle_errors(
        || async move {
            let Query(query) =
                query.map_err(|rejection| AppError::bad_request(rejection.body_text()))?;
            query.validate().map_err(AppError::bad_request)?;

            let page = Paginated::from_slice(&catalog(), query.page(), query.per_page());
            let (reports, pagination) = crate::api::response::paginated_response(&page)
                .map_err(|e| {
                    tracing::error!(error = %e, "failed to serialize reports page");
                    AppError::Internal
                })?;

            Ok::<_, AppError>(api_response(
                "Reports",
                Some(json!({ "reports": reports, "pagination": pagination })),
                StatusCode::OK,
            ))
        },
        Some("Could not list reports"),
    )
    .await
}
