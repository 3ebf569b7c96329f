//! In-app prompt routes for the signed-in user.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::UserPrompt;
use persistence::repositories::PromptRepository;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

/// GET /api/prompts
pub async fn list_prompts(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<UserPrompt>>, ApiError> {
    let prompts = PromptRepository::new(state.pool.clone())
        .list_active_for_user(auth.user_id)
        .await?
        .into_iter()
        .map(UserPrompt::from)
        .collect();
    Ok(Json(prompts))
}

/// POST /api/prompts/:id/dismiss
pub async fn dismiss_prompt(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let dismissed = PromptRepository::new(state.pool.clone())
        .dismiss(id, auth.user_id)
        .await?;
    if dismissed == 0 {
        return Err(ApiError::NotFound("Prompt not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
