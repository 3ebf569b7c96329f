//! Self-service profile routes.

use axum::{
    extract::{Query, State},
    Json,
};
use domain::models::automation_rule::TRIGGER_INCOMPLETE_PROFILE;
use domain::models::{Profile, UpdatePasswordRequest, UpdateProfileRequest, UsernameAvailability};
use persistence::repositories::ProfileRepository;
use serde::Deserialize;
use shared::password;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

#[derive(Debug, Deserialize)]
pub struct UsernameQuery {
    pub username: String,
}

/// GET /api/profiles/me
pub async fn get_me(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Profile>, ApiError> {
    let entity = ProfileRepository::new(state.pool.clone())
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;
    Ok(Json(entity.into()))
}

/// PATCH /api/profiles/me
///
/// Every successful edit re-evaluates profile completeness so the
/// incomplete-profile nag appears or clears as appropriate.
pub async fn update_me(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    request.validate()?;

    let profiles = ProfileRepository::new(state.pool.clone());

    if let Some(username) = &request.username {
        let current = profiles
            .find_by_id(auth.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;
        if !current.username.eq_ignore_ascii_case(username)
            && profiles.username_exists(username).await?
        {
            return Err(ApiError::Conflict("Username is already taken".into()));
        }
    }

    let entity = profiles
        .update_profile(
            auth.user_id,
            request.username.as_deref(),
            request.display_name.as_deref(),
            request.bio.as_deref(),
            request.avatar_url.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;

    if let Err(e) = state
        .automation
        .handle_trigger(auth.user_id, TRIGGER_INCOMPLETE_PROFILE, None)
        .await
    {
        tracing::error!(user_id = %auth.user_id, error = %e, "Completeness evaluation failed");
    }

    Ok(Json(entity.into()))
}

/// PUT /api/profiles/me/password
pub async fn change_password(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<UpdatePasswordRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let profiles = ProfileRepository::new(state.pool.clone());
    let entity = profiles
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Profile not found".into()))?;

    let valid = password::verify_password(&request.current_password, &entity.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(ApiError::Unauthorized("Current password is incorrect".into()));
    }

    let hash = password::hash_password(&request.new_password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;
    profiles.update_password(auth.user_id, &hash).await?;

    Ok(Json(serde_json::json!({ "updated": true })))
}

/// GET /api/profiles/username-available?username=...
pub async fn username_available(
    State(state): State<AppState>,
    Query(query): Query<UsernameQuery>,
) -> Result<Json<UsernameAvailability>, ApiError> {
    shared::validation::validate_username(&query.username)
        .map_err(|_| ApiError::Validation("Invalid username format".into()))?;

    let exists = ProfileRepository::new(state.pool.clone())
        .username_exists(&query.username)
        .await?;

    Ok(Json(UsernameAvailability {
        username: query.username,
        available: !exists,
    }))
}
