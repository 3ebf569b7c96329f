//! Ad credit wallet routes.

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use domain::models::{CreateCreditRequest, CreditRequest, CreditStatus, Profile};
use domain::services::{InvoiceData, InvoiceGenerator};
use persistence::repositories::{CreditRepository, ProfileRepository};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

/// POST /api/credits
pub async fn create_request(
    State(state): State<AppState>,
    auth: UserAuth,
    Json(request): Json<CreateCreditRequest>,
) -> Result<(StatusCode, Json<CreditRequest>), ApiError> {
    request.validate()?;

    let entity = CreditRepository::new(state.pool.clone())
        .create(auth.user_id, request.amount_cents)
        .await?;

    Ok((StatusCode::CREATED, Json(entity.into())))
}

/// GET /api/credits
pub async fn list_own_requests(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<Vec<CreditRequest>>, ApiError> {
    let requests = CreditRepository::new(state.pool.clone())
        .list_by_advertiser(auth.user_id)
        .await?
        .into_iter()
        .map(CreditRequest::from)
        .collect();
    Ok(Json(requests))
}

/// GET /api/credits/:id/invoice
///
/// Renders a PDF invoice for an approved request. Available to the owner
/// and to admins; pending or rejected requests have no invoice.
pub async fn download_invoice(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
) -> Result<(HeaderMap, Vec<u8>), ApiError> {
    let request: CreditRequest = CreditRepository::new(state.pool.clone())
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Credit request not found".into()))?
        .into();

    let profiles = ProfileRepository::new(state.pool.clone());
    let caller: Profile = profiles
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Profile no longer exists".into()))?
        .into();

    if request.advertiser_id != auth.user_id && !caller.role.is_admin() {
        return Err(ApiError::NotFound("Credit request not found".into()));
    }

    if request.status != CreditStatus::Approved {
        return Err(ApiError::Conflict(
            "Invoices exist only for approved requests".into(),
        ));
    }

    let advertiser: Profile = profiles
        .find_by_id(request.advertiser_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Advertiser profile not found".into()))?
        .into();

    let data = InvoiceData {
        invoice_number: request.invoice_number(),
        issued_at: request.decided_at.unwrap_or(request.created_at),
        customer_name: advertiser
            .display_name
            .clone()
            .unwrap_or_else(|| advertiser.username.clone()),
        customer_email: advertiser.email.clone(),
        description: "Advertising credit".to_string(),
        amount_cents: request.amount_cents,
    };

    let pdf = InvoiceGenerator::generate(&data)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/pdf"),
    );
    if let Ok(disposition) = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}.pdf\"",
        data.invoice_number
    )) {
        headers.insert(header::CONTENT_DISPOSITION, disposition);
    }

    Ok((headers, pdf))
}

/// GET /api/admin/credits/pending
pub async fn list_pending(
    State(state): State<AppState>,
) -> Result<Json<Vec<CreditRequest>>, ApiError> {
    let requests = CreditRepository::new(state.pool.clone())
        .list_pending(100)
        .await?
        .into_iter()
        .map(CreditRequest::from)
        .collect();
    Ok(Json(requests))
}

/// POST /api/admin/credits/:id/approve
///
/// Approval and the wallet credit happen in one database transaction.
/// A request that is no longer pending cannot be approved again.
pub async fn approve_request(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<CreditRequest>, ApiError> {
    let repo = CreditRepository::new(state.pool.clone());

    match repo.approve(id, auth.user_id).await? {
        Some(entity) => Ok(Json(entity.into())),
        None => match repo.find_by_id(id).await? {
            Some(_) => Err(ApiError::Conflict("Request has already been decided".into())),
            None => Err(ApiError::NotFound("Credit request not found".into())),
        },
    }
}

/// POST /api/admin/credits/:id/reject
pub async fn reject_request(
    State(state): State<AppState>,
    auth: UserAuth,
    Path(id): Path<Uuid>,
) -> Result<Json<CreditRequest>, ApiError> {
    let repo = CreditRepository::new(state.pool.clone());

    match repo.reject(id, auth.user_id).await? {
        Some(entity) => Ok(Json(entity.into())),
        None => match repo.find_by_id(id).await? {
            Some(_) => Err(ApiError::Conflict("Request has already been decided".into())),
            None => Err(ApiError::NotFound("Credit request not found".into())),
        },
    }
}
