//! Admin prompt management and automation rules.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::automation_rule::{TriggerRequest, UpsertRuleRequest};
use domain::models::{AutomationRule, CreatePromptRequest, UserPrompt};
use persistence::repositories::{AutomationRuleRepository, PromptRepository};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;
use crate::services::automation::TriggerOutcome;

/// POST /api/admin/prompts
pub async fn create_prompt(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreatePromptRequest>,
) -> Result<(StatusCode, Json<UserPrompt>), ApiError> {
    request.validate()?;

    let entity = PromptRepository::new(state.pool.clone())
        .create(
            request.user_id,
            &request.title,
            &request.message,
            request.prompt_type,
            request.action_url.as_deref(),
            Some(auth.user_id),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// POST /api/admin/prompts/cleanup
pub async fn cleanup_dismissed(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let deleted = PromptRepository::new(state.pool.clone())
        .delete_dismissed()
        .await?;
    Ok(Json(serde_json::json!({ "deleted": deleted })))
}

/// GET /api/admin/automation/rules
pub async fn list_rules(
    State(state): State<AppState>,
) -> Result<Json<Vec<AutomationRule>>, ApiError> {
    let rules = AutomationRuleRepository::new(state.pool.clone())
        .list()
        .await?
        .into_iter()
        .map(AutomationRule::from)
        .collect();
    Ok(Json(rules))
}

/// PUT /api/admin/automation/rules
///
/// One rule per trigger type; an existing rule for the same trigger is
/// replaced.
pub async fn upsert_rule(
    State(state): State<AppState>,
    Json(request): Json<UpsertRuleRequest>,
) -> Result<Json<AutomationRule>, ApiError> {
    request.validate()?;

    let entity = AutomationRuleRepository::new(state.pool.clone())
        .upsert(
            &request.trigger_type.to_lowercase(),
            &request.title,
            &request.message,
            request.prompt_type,
            request.action_url.as_deref(),
            request.send_email,
            request.email_subject.as_deref(),
            request.is_active,
        )
        .await?;

    Ok(Json(entity.into()))
}

/// DELETE /api/admin/automation/rules/:id
pub async fn delete_rule(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let deleted = AutomationRuleRepository::new(state.pool.clone())
        .delete(id)
        .await?;
    if deleted == 0 {
        return Err(ApiError::NotFound("Rule not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/admin/automation/trigger
///
/// Fires a trigger for a user as if the event had happened organically.
pub async fn manual_trigger(
    State(state): State<AppState>,
    Json(request): Json<TriggerRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    request.validate()?;

    let outcome = state
        .automation
        .handle_trigger(
            request.user_id,
            &request.trigger_type.to_lowercase(),
            request.recipient_email.as_deref(),
        )
        .await?;

    let outcome_str = match outcome {
        TriggerOutcome::Fired => "fired",
        TriggerOutcome::Debounced => "debounced",
        TriggerOutcome::NoRule => "no_rule",
        TriggerOutcome::Duplicate => "duplicate",
        TriggerOutcome::ProfileComplete => "profile_complete",
    };

    Ok(Json(serde_json::json!({ "outcome": outcome_str })))
}
