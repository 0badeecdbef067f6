/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth: bearer token の検証 (access) と role による認可 (role)
 * - http / cors: 全ルート共通の transport 層
 */
pub mod auth;
pub mod cors;
pub mod http;
