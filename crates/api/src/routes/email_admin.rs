//! Email audit log for the admin back office.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::models::{EmailLog, EmailStats};
use persistence::repositories::EmailLogRepository;
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;

const DEFAULT_HISTORY_LIMIT: i64 = 50;
const MAX_HISTORY_LIMIT: i64 = 500;

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// GET /api/admin/email/history?limit=
pub async fn history(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<EmailLog>>, ApiError> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);

    let entries = EmailLogRepository::new(state.pool.clone())
        .history(limit)
        .await?
        .into_iter()
        .map(EmailLog::from)
        .collect();
    Ok(Json(entries))
}

/// GET /api/admin/email/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<EmailStats>, ApiError> {
    let stats = EmailLogRepository::new(state.pool.clone()).stats().await?;
    Ok(Json(stats))
}
