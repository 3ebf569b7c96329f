//! Orphaned media administration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::app::AppState;
use crate::error::ApiError;
use crate::services::OrphanReport;

/// GET /api/admin/media/orphans
///
/// Walks every bucket and reports stored objects no database row
/// references. Read-only; nothing is deleted here.
pub async fn list_orphans(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrphanReport>>, ApiError> {
    let reports = state.orphan_scanner().scan().await?;
    Ok(Json(reports))
}

/// DELETE /api/admin/media/:bucket/:key
///
/// Re-checks references immediately before deleting, so an object that
/// became referenced after the scan is left alone.
pub async fn remove_orphan(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    state.orphan_scanner().remove(&bucket, &key).await?;
    tracing::info!(bucket = %bucket, key = %key, "Removed orphaned object");
    Ok(StatusCode::NO_CONTENT)
}
