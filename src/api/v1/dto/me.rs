/*
 * Responsibility
 * - GET /me の response DTO
 */
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub roles: Vec<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
