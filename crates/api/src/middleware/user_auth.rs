//! JWT authentication middleware.

use axum::{
    body::Body,
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use shared::jwt::JwtConfig;
use uuid::Uuid;

use crate::{app::AppState, config::JwtAuthConfig, error::ApiError};

/// Authenticated caller identity, inserted into request extensions by
/// [`require_user_auth`] and read by extractors and downstream middleware.
#[derive(Debug, Clone)]
pub struct UserAuth {
    pub user_id: Uuid,
    pub jti: String,
}

impl UserAuth {
    /// Validates a bearer token and returns the caller identity.
    pub fn validate(token: &str, jwt: &JwtConfig) -> Result<Self, ApiError> {
        let claims = jwt
            .validate_access_token(token)
            .map_err(|e| ApiError::Unauthorized(format!("Invalid token: {}", e)))?;

        let user_id = shared::jwt::extract_profile_id(&claims)
            .map_err(|_| ApiError::Unauthorized("Invalid token subject".into()))?;

        Ok(UserAuth {
            user_id,
            jti: claims.jti,
        })
    }
}

/// Builds the JWT validation config from application settings.
pub fn create_jwt_config(settings: &JwtAuthConfig) -> Result<JwtConfig, ApiError> {
    JwtConfig::new(
        &settings.private_key,
        &settings.public_key,
        settings.access_token_expiry_secs,
        settings.refresh_token_expiry_secs,
        settings.leeway_secs,
    )
    .map_err(|e| ApiError::Internal(format!("JWT configuration error: {}", e)))
}

/// Extracts the bearer token from the Authorization header.
pub fn extract_bearer_token(req: &Request<Body>) -> Result<&str, ApiError> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))
}

/// Middleware that requires a valid access token.
///
/// On success the [`UserAuth`] identity is inserted into request extensions.
pub async fn require_user_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer_token(&req)?.to_string();
    let jwt = create_jwt_config(&state.config.jwt)?;
    let auth = UserAuth::validate(&token, &jwt)?;

    req.extensions_mut().insert(auth);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_jwt_config;

    #[test]
    fn test_validate_accepts_own_token() {
        let jwt = test_jwt_config();
        let user_id = Uuid::new_v4();
        let (token, jti) = jwt.generate_access_token(user_id).expect("token");

        let auth = UserAuth::validate(&token, &jwt).expect("valid");
        assert_eq!(auth.user_id, user_id);
        assert_eq!(auth.jti, jti);
    }

    #[test]
    fn test_validate_rejects_garbage() {
        let jwt = test_jwt_config();
        let err = UserAuth::validate("not-a-token", &jwt).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_validate_rejects_refresh_token() {
        let jwt = test_jwt_config();
        let user_id = Uuid::new_v4();
        let (token, _) = jwt.generate_refresh_token(user_id).expect("token");
        let err = UserAuth::validate(&token, &jwt).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }
}
