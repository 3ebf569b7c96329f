//! Tag routes: public listing, admin curation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{CreateTagRequest, ReorderTagsRequest, Tag, UpdateTagRequest};
use persistence::repositories::TagRepository;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;

/// GET /api/tags (public)
///
/// Pinned tags first, then manual order, then name.
pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>, ApiError> {
    let tags = TagRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(Tag::from)
        .collect();
    Ok(Json(tags))
}

/// POST /api/admin/tags
pub async fn create_tag(
    State(state): State<AppState>,
    Json(request): Json<CreateTagRequest>,
) -> Result<(StatusCode, Json<Tag>), ApiError> {
    request.validate()?;

    let repo = TagRepository::new(state.pool.clone());
    let slug = request.effective_slug();
    if repo.find_by_slug(&slug).await?.is_some() {
        return Err(ApiError::Conflict(format!("Slug '{}' is already in use", slug)));
    }

    let entity = repo
        .create(&request.name, &slug, request.is_pinned, request.is_featured)
        .await?;

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// PATCH /api/admin/tags/:id
pub async fn update_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTagRequest>,
) -> Result<Json<Tag>, ApiError> {
    request.validate()?;

    let entity = TagRepository::new(state.pool.clone())
        .update(
            id,
            request.name.as_deref(),
            request.slug.as_deref(),
            request.is_pinned,
            request.is_featured,
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Tag not found".into()))?;

    Ok(Json(entity.into()))
}

/// DELETE /api/admin/tags/:id
pub async fn delete_tag(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = TagRepository::new(state.pool.clone()).delete(id).await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Tag not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/tags/reorder
///
/// Takes the full visible set in its new order; duplicate ids would make
/// the order ambiguous and are rejected.
pub async fn reorder_tags(
    State(state): State<AppState>,
    Json(request): Json<ReorderTagsRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;
    if request.has_duplicates() {
        return Err(ApiError::Validation("Duplicate tag ids in reorder".into()));
    }

    let updated = TagRepository::new(state.pool.clone())
        .reorder(&request.tag_ids)
        .await?;

    Ok(Json(serde_json::json!({ "reordered": updated })))
}
