//! Role checks for moderator and admin route groups.

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use domain::models::Profile;
use persistence::repositories::ProfileRepository;

use crate::{app::AppState, error::ApiError, middleware::user_auth::UserAuth};

/// The profile of the authenticated caller, loaded by the role middleware
/// and available to downstream handlers.
#[derive(Debug, Clone)]
pub struct CurrentProfile(pub Profile);

async fn load_profile(state: &AppState, auth: &UserAuth) -> Result<Profile, ApiError> {
    let repo = ProfileRepository::new(state.pool.clone());
    let profile = repo
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Profile no longer exists".into()))?;

    if profile.is_banned {
        return Err(ApiError::Forbidden("Account is banned".into()));
    }

    Ok(profile.into())
}

/// Middleware requiring the moderator or admin role.
pub async fn require_moderator(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = req
        .extensions()
        .get::<UserAuth>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;

    let profile = load_profile(&state, &auth).await?;
    if !profile.role.can_moderate() {
        return Err(ApiError::Forbidden("Moderator access required".into()));
    }

    req.extensions_mut().insert(CurrentProfile(profile));
    Ok(next.run(req).await)
}

/// Middleware requiring the admin role.
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let auth = req
        .extensions()
        .get::<UserAuth>()
        .cloned()
        .ok_or_else(|| ApiError::Unauthorized("Authentication required".into()))?;

    let profile = load_profile(&state, &auth).await?;
    if !profile.role.is_admin() {
        return Err(ApiError::Forbidden("Admin access required".into()));
    }

    req.extensions_mut().insert(CurrentProfile(profile));
    Ok(next.run(req).await)
}
