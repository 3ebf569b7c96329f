//! Campaign routes for advertisers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{
    Campaign, CampaignStatusRequest, CreateCampaignRequest, UpdateCampaignRequest,
};
use persistence::entities::CampaignEntity;
use persistence::repositories::CampaignRepository;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

/// Loads a campaign and enforces ownership. Someone else's campaign is
/// reported as missing rather than forbidden.
async fn load_owned(
    repo: &CampaignRepository,
    id: Uuid,
    owner: Uuid,
) -> Result<CampaignEntity, ApiError> {
    let entity = repo
        .find_by_id(id)
        .await?
        .filter(|c| c.advertiser_id == owner)
        .ok_or_else(|| ApiError::NotFound("Campaign not found".into()))?;
    Ok(entity)
}

/// POST /api/campaigns
pub async fn create_campaign(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<(StatusCode, Json<Campaign>), ApiError> {
    request.validate()?;

    let entity = CampaignRepository::new(state.pool.clone())
        .create(auth.user_id, &request.name, request.budget_cents)
        .await?;

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// GET /api/campaigns
pub async fn list_campaigns(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<Campaign>>, ApiError> {
    let campaigns = CampaignRepository::new(state.pool.clone())
        .list_by_advertiser(auth.user_id)
        .await?
        .into_iter()
        .map(Campaign::from)
        .collect();
    Ok(Json(campaigns))
}

/// GET /api/campaigns/:id
pub async fn get_campaign(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<Campaign>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let entity = load_owned(&repo, id, auth.user_id).await?;
    Ok(Json(entity.into()))
}

/// PATCH /api/campaigns/:id
pub async fn update_campaign(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, ApiError> {
    request.validate()?;

    let repo = CampaignRepository::new(state.pool.clone());
    load_owned(&repo, id, auth.user_id).await?;

    let entity = repo
        .update(id, request.name.as_deref(), request.budget_cents)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".into()))?;

    Ok(Json(entity.into()))
}

/// POST /api/campaigns/:id/status
///
/// Invalid transitions (resuming an archived campaign, pausing a draft)
/// are rejected with a conflict.
pub async fn change_status(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<CampaignStatusRequest>,
) -> Result<Json<Campaign>, ApiError> {
    let repo = CampaignRepository::new(state.pool.clone());
    let current = load_owned(&repo, id, auth.user_id).await?;

    if !current.status.can_transition_to(request.status) {
        return Err(ApiError::Conflict(format!(
            "Cannot move campaign from {} to {}",
            current.status, request.status
        )));
    }

    let entity = repo
        .set_status(id, request.status)
        .await?
        .ok_or_else(|| ApiError::NotFound("Campaign not found".into()))?;

    Ok(Json(entity.into()))
}
