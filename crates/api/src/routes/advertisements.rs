//! Advertisement routes: creative management and public engagement counters.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use domain::models::{Advertisement, CreateAdvertisementRequest, UpdateAdvertisementRequest};
use persistence::entities::AdvertisementEntity;
use persistence::repositories::{AdvertisementRepository, CampaignRepository};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

async fn check_campaign_owner(
    state: &AppState,
    campaign_id: Uuid,
    owner: Uuid,
) -> Result<(), ApiError> {
    CampaignRepository::new(state.pool.clone())
        .find_by_id(campaign_id)
        .await?
        .filter(|c| c.advertiser_id == owner)
        .ok_or_else(|| ApiError::NotFound("Campaign not found".into()))?;
    Ok(())
}

async fn load_owned_ad(
    state: &AppState,
    ad_id: Uuid,
    owner: Uuid,
) -> Result<AdvertisementEntity, ApiError> {
    let ad = AdvertisementRepository::new(state.pool.clone())
        .find_by_id(ad_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Advertisement not found".into()))?;

    check_campaign_owner(state, ad.campaign_id, owner).await?;
    Ok(ad)
}

/// POST /api/campaigns/:id/ads
pub async fn create_ad(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(campaign_id): Path<Uuid>,
    Json(request): Json<CreateAdvertisementRequest>,
) -> Result<(StatusCode, Json<Advertisement>), ApiError> {
    request.validate()?;
    check_campaign_owner(&state, campaign_id, auth.user_id).await?;

    let entity = AdvertisementRepository::new(state.pool.clone())
        .create(
            campaign_id,
            &request.title,
            request.image_url.as_deref(),
            &request.target_url,
            &request.tags,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// GET /api/campaigns/:id/ads
pub async fn list_ads(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<Vec<Advertisement>>, ApiError> {
    check_campaign_owner(&state, campaign_id, auth.user_id).await?;

    let ads = AdvertisementRepository::new(state.pool.clone())
        .list_by_campaign(campaign_id)
        .await?
        .into_iter()
        .map(Advertisement::from)
        .collect();
    Ok(Json(ads))
}

/// PATCH /api/ads/:id
///
/// Any creative change sends the ad back to the moderation queue.
pub async fn update_ad(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateAdvertisementRequest>,
) -> Result<Json<Advertisement>, ApiError> {
    request.validate()?;
    load_owned_ad(&state, id, auth.user_id).await?;

    let entity = AdvertisementRepository::new(state.pool.clone())
        .update_creative(
            id,
            request.title.as_deref(),
            request.image_url.as_deref(),
            request.target_url.as_deref(),
            request.tags.as_deref(),
        )
        .await?
        .ok_or_else(|| ApiError::NotFound("Advertisement not found".into()))?;

    Ok(Json(entity.into()))
}

/// DELETE /api/ads/:id (soft delete)
pub async fn archive_ad(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    load_owned_ad(&state, id, auth.user_id).await?;

    let archived = AdvertisementRepository::new(state.pool.clone())
        .archive(id, Utc::now())
        .await?;
    if archived == 0 {
        return Err(ApiError::NotFound("Advertisement not found".into()));
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/ads/:id/impression (public, no session)
pub async fn record_impression(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let updated = AdvertisementRepository::new(state.pool.clone())
        .record_impression(id)
        .await?;
    if updated == 0 {
        return Err(ApiError::NotFound("Advertisement not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/ads/:id/click (public, no session)
pub async fn record_click(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let updated = AdvertisementRepository::new(state.pool.clone())
        .record_click(id)
        .await?;
    if updated == 0 {
        return Err(ApiError::NotFound("Advertisement not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
