//! Read-only table browser for the admin back office.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use persistence::repositories::{TableBrowserRepository, BROWSABLE_TABLES};
use serde::Serialize;
use shared::pagination::PageParams;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct TablePage {
    pub table: String,
    pub rows: Vec<serde_json::Value>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

/// GET /api/admin/tables
pub async fn list_tables() -> Json<Vec<&'static str>> {
    Json(BROWSABLE_TABLES.to_vec())
}

/// GET /api/admin/tables/:name?limit=&offset=
pub async fn browse_table(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(page): Query<PageParams>,
) -> Result<Json<TablePage>, ApiError> {
    let repo = TableBrowserRepository::new(state.pool.clone());

    let rows = repo
        .list_rows(&name, page.limit(), page.offset())
        .await?
        .ok_or_else(|| ApiError::NotFound("Unknown table".into()))?;
    let total = repo.count_rows(&name).await?.unwrap_or(0);

    Ok(Json(TablePage {
        table: name,
        rows,
        total,
        limit: page.limit(),
        offset: page.offset(),
    }))
}
