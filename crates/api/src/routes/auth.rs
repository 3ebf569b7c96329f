//! Account registration, login and email verification.

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use domain::models::automation_rule::TRIGGER_SIGNUP;
use domain::models::{LoginRequest, Profile, RegisterRequest, TokenResponse};
use persistence::repositories::{ProfileRepository, VerificationTokenRepository};
use serde::{Deserialize, Serialize};
use shared::{password, token};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::create_jwt_config;
use crate::services::email::verification_email;

/// Verification token lifetime.
const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
    pub message: String,
    pub email: Option<String>,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Profile>), ApiError> {
    request.validate()?;

    let profiles = ProfileRepository::new(state.pool.clone());
    if profiles.username_exists(&request.username).await? {
        return Err(ApiError::Conflict("Username is already taken".into()));
    }

    let hash = password::hash_password(&request.password)
        .map_err(|e| ApiError::Internal(format!("Password hashing failed: {}", e)))?;

    let profile: Profile = profiles
        .create(
            &request.username,
            &request.email,
            &hash,
            request.display_name.as_deref(),
        )
        .await?
        .into();

    issue_verification_token(&state, &profile).await?;

    // Signup automation failure must not fail registration.
    if let Err(e) = state
        .automation
        .handle_trigger(profile.id, TRIGGER_SIGNUP, None)
        .await
    {
        tracing::error!(user_id = %profile.id, error = %e, "Signup automation failed");
    }

    Ok((StatusCode::CREATED, Json(profile)))
}

async fn issue_verification_token(state: &AppState, profile: &Profile) -> Result<(), ApiError> {
    let raw = token::generate_token();
    let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);

    VerificationTokenRepository::new(state.pool.clone())
        .create(profile.id, &token::hash_token(&raw), expires_at)
        .await?;

    let (subject, body) = verification_email(state.email.base_url(), &profile.username, &raw);
    if let Err(e) = state
        .email
        .enqueue(&profile.email, &subject, &body, "verification", None)
        .await
    {
        tracing::error!(user_id = %profile.id, error = %e, "Failed to queue verification email");
    }

    Ok(())
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let profiles = ProfileRepository::new(state.pool.clone());
    let Some(entity) = profiles.find_by_email(&request.email).await? else {
        return Err(ApiError::Unauthorized("Invalid email or password".into()));
    };

    let valid = password::verify_password(&request.password, &entity.password_hash)
        .map_err(|e| ApiError::Internal(format!("Password verification failed: {}", e)))?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid email or password".into()));
    }

    if entity.is_banned {
        return Err(ApiError::Forbidden("Account is banned".into()));
    }

    issue_token_pair(&state, entity.id)
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let jwt = create_jwt_config(&state.config.jwt)?;
    let claims = jwt
        .validate_refresh_token(&request.refresh_token)
        .map_err(|e| ApiError::Unauthorized(format!("Invalid refresh token: {}", e)))?;

    let user_id = shared::jwt::extract_profile_id(&claims)
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".into()))?;

    let profiles = ProfileRepository::new(state.pool.clone());
    let Some(entity) = profiles.find_by_id(user_id).await? else {
        return Err(ApiError::Unauthorized("Profile no longer exists".into()));
    };
    if entity.is_banned {
        return Err(ApiError::Forbidden("Account is banned".into()));
    }

    issue_token_pair(&state, user_id)
}

fn issue_token_pair(state: &AppState, user_id: uuid::Uuid) -> Result<Json<TokenResponse>, ApiError> {
    let jwt = create_jwt_config(&state.config.jwt)?;

    let (access_token, _) = jwt
        .generate_access_token(user_id)
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;
    let (refresh_token, _) = jwt
        .generate_refresh_token(user_id)
        .map_err(|e| ApiError::Internal(format!("Token generation failed: {}", e)))?;

    Ok(Json(TokenResponse {
        access_token,
        refresh_token,
        expires_in: state.config.jwt.access_token_expiry_secs,
    }))
}

/// POST /api/auth/verify
///
/// Consumes a verification token. Responds 200 with a success flag rather
/// than an error status so clients can render the outcome directly.
pub async fn verify_email(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let tokens = VerificationTokenRepository::new(state.pool.clone());
    let Some(record) = tokens.find_by_hash(&token::hash_token(&request.token)).await? else {
        return Ok(Json(VerifyResponse {
            success: false,
            message: "Invalid verification token".into(),
            email: None,
        }));
    };

    if record.is_used() {
        return Ok(Json(VerifyResponse {
            success: false,
            message: "Token has already been used".into(),
            email: None,
        }));
    }

    if record.is_expired(Utc::now()) {
        return Ok(Json(VerifyResponse {
            success: false,
            message: "Token has expired".into(),
            email: None,
        }));
    }

    tokens.mark_used(record.id).await?;

    let profiles = ProfileRepository::new(state.pool.clone());
    profiles.mark_verified(record.user_id).await?;
    let email = profiles
        .find_by_id(record.user_id)
        .await?
        .map(|entity| entity.email);

    Ok(Json(VerifyResponse {
        success: true,
        message: "Email verified".into(),
        email,
    }))
}
