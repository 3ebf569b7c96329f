//! Extractor for the authenticated caller identity.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    app::AppState,
    error::ApiError,
    middleware::user_auth::{create_jwt_config, UserAuth},
};

#[async_trait]
impl FromRequestParts<AppState> for UserAuth {
    type Rejection = ApiError;

    /// Prefers the identity inserted by the auth middleware; falls back to
    /// validating the bearer token directly so handlers outside the
    /// middleware stack can still opt in to authentication.
    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(auth) = parts.extensions.get::<UserAuth>() {
            return Ok(auth.clone());
        }

        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

        let jwt = create_jwt_config(&state.config.jwt)?;
        UserAuth::validate(token, &jwt)
    }
}
