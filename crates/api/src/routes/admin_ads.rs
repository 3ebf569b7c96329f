//! Advertisement moderation queue.

use axum::{
    extract::{Path, State},
    Json,
};
use domain::models::{AdDecisionRequest, Advertisement, ApprovalStatus};
use persistence::repositories::AdvertisementRepository;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_ad_decision;

/// GET /api/admin/ads/pending
///
/// Oldest submissions first so nothing starves at the back of the queue.
pub async fn list_pending(
    State(state): State<AppState>,
) -> Result<Json<Vec<Advertisement>>, ApiError> {
    let ads = AdvertisementRepository::new(state.pool.clone())
        .list_pending(100)
        .await?
        .into_iter()
        .map(Advertisement::from)
        .collect();
    Ok(Json(ads))
}

/// POST /api/admin/ads/:id/decision
///
/// Decisions are final; a decision on an ad that is no longer pending
/// (already decided, or edited back into the queue meanwhile) is rejected.
pub async fn decide(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdDecisionRequest>,
) -> Result<Json<Advertisement>, ApiError> {
    request.validate()?;

    let reason = request.reason.as_deref().map(str::trim).filter(|r| !r.is_empty());
    if !request.approve && reason.is_none() {
        return Err(ApiError::Validation("Rejection requires a reason".into()));
    }

    let status = if request.approve {
        ApprovalStatus::Approved
    } else {
        ApprovalStatus::Rejected
    };

    let repo = AdvertisementRepository::new(state.pool.clone());
    let decided = repo
        .decide(id, status, if request.approve { None } else { reason })
        .await?;

    match decided {
        Some(entity) => {
            record_ad_decision(if request.approve { "approved" } else { "rejected" });
            Ok(Json(entity.into()))
        }
        None => match repo.find_by_id(id).await? {
            Some(_) => Err(ApiError::Conflict("Advertisement is not pending".into())),
            None => Err(ApiError::NotFound("Advertisement not found".into())),
        },
    }
}
