//! Admin user management.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::{AdminUpdateProfileRequest, BulkDeleteUsersRequest, Profile};
use persistence::repositories::ProfileRepository;
use serde::Deserialize;
use shared::pagination::{Page, PageParams};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct UserListQuery {
    pub search: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

/// GET /api/admin/users?search=&limit=&offset=
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<UserListQuery>,
) -> Result<Json<Page<Profile>>, ApiError> {
    let search = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let (entities, total) = ProfileRepository::new(state.pool.clone())
        .list_paged(search, query.page.limit(), query.page.offset())
        .await?;

    let profiles = entities.into_iter().map(Profile::from).collect();
    Ok(Json(Page::new(profiles, total, query.page)))
}

/// PATCH /api/admin/users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdminUpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let entity = ProfileRepository::new(state.pool.clone())
        .admin_update(id, request.role, request.is_verified, request.is_banned)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".into()))?;

    Ok(Json(entity.into()))
}

/// GET /api/admin/users/unverified
pub async fn list_unverified(
    State(state): State<AppState>,
) -> Result<Json<Vec<Profile>>, ApiError> {
    let profiles = ProfileRepository::new(state.pool.clone())
        .list_unverified(100)
        .await?
        .into_iter()
        .map(Profile::from)
        .collect();
    Ok(Json(profiles))
}

/// POST /api/admin/users/bulk-delete
pub async fn bulk_delete(
    State(state): State<AppState>,
    Json(request): Json<BulkDeleteUsersRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let deleted = ProfileRepository::new(state.pool.clone())
        .bulk_delete(&request.user_ids)
        .await?;

    tracing::info!(deleted, "Admin bulk user delete");
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}
