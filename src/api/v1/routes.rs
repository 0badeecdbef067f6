/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証 (access) を掛ける範囲と、route ごとの必要 role をここで決める
 */
use axum::{Router, routing::get};

use crate::api::v1::handlers::{
    admin::admin_dashboard, health::health, me::me, reports::list_reports,
};
use crate::middleware::auth::{access, require_roles};
use crate::state::AppState;

pub fn routes(state: &AppState) -> Router<AppState> {
    let public = Router::new().route("/health", get(health));

    let admin = require_roles(
        Router::new().route("/admin", get(admin_dashboard)),
        state,
        &["admin"],
    );
    let reports = require_roles(
        Router::new().route("/reports", get(list_reports)),
        state,
        &["admin", "editor"],
    );

    let protected = Router::new()
        .route("/me", get(me))
        .merge(admin)
        .merge(reports);

    public.merge(access::apply(protected, state.clone()))
}
