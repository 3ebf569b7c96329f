//! Feature flag administration.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{FeatureAccess, FeatureFlag, GrantAccessRequest, UpsertFlagRequest};
use persistence::repositories::FeatureFlagRepository;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

/// GET /api/admin/features
pub async fn list_flags(
    State(state): State<AppState>,
) -> Result<Json<Vec<FeatureFlag>>, ApiError> {
    let flags = FeatureFlagRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(FeatureFlag::from)
        .collect();
    Ok(Json(flags))
}

/// PUT /api/admin/features
pub async fn upsert_flag(
    State(state): State<AppState>,
    Json(request): Json<UpsertFlagRequest>,
) -> Result<Json<FeatureFlag>, ApiError> {
    request.validate()?;

    let entity = FeatureFlagRepository::new(state.pool.clone())
        .upsert(
            &request.normalized_id(),
            request.description.as_deref(),
            request.is_enabled,
            request.is_beta,
        )
        .await?;

    Ok(Json(entity.into()))
}

/// DELETE /api/admin/features/:id
///
/// Removes the flag and, via cascade, every per-user override on it.
pub async fn delete_flag(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let deleted = FeatureFlagRepository::new(state.pool.clone())
        .delete(&id)
        .await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Feature flag not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/admin/features/:id/access
pub async fn list_access(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<FeatureAccess>>, ApiError> {
    let grants = FeatureFlagRepository::new(state.pool.clone())
        .list_access_for_feature(&id)
        .await?
        .into_iter()
        .map(FeatureAccess::from)
        .collect();
    Ok(Json(grants))
}

/// POST /api/admin/features/:id/access
///
/// Granting twice is a no-op, not an error.
pub async fn grant_access(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<String>,
    Json(request): Json<GrantAccessRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    if request.feature_id != id {
        return Err(ApiError::Validation(
            "Feature id in path and body do not match".into(),
        ));
    }

    let granted = FeatureFlagRepository::new(state.pool.clone())
        .grant_access(request.user_id, &id, auth.user_id)
        .await?;

    Ok(Json(serde_json::json!({ "granted": granted.is_some() })))
}

/// DELETE /api/admin/features/:id/access/:user_id
pub async fn revoke_access(
    State(state): State<AppState>,
    Path((id, user_id)): Path<(String, Uuid)>,
) -> Result<StatusCode, ApiError> {
    let revoked = FeatureFlagRepository::new(state.pool.clone())
        .revoke_access(user_id, &id)
        .await?;
    if revoked == 0 {
        return Err(ApiError::NotFound("Access grant not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
