//! Feature resolution for the signed-in user.

use axum::{extract::State, Json};
use domain::services::{FeatureSet, FlagState};
use persistence::entities::FeatureFlagEntity;
use persistence::repositories::{FeatureFlagRepository, ProfileRepository};
use serde::Serialize;
use std::collections::HashMap;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::user_auth::UserAuth;

#[derive(Debug, Serialize)]
pub struct ResolvedFeatures {
    pub features: HashMap<String, bool>,
    pub is_admin: bool,
}

/// GET /api/features
///
/// Resolves every known flag for the caller: admins see everything
/// enabled, per-user overrides beat the global default, unknown flags
/// stay off.
pub async fn resolve_features(
    State(state): State<AppState>,
    auth: UserAuth,
) -> Result<Json<ResolvedFeatures>, ApiError> {
    let profile = ProfileRepository::new(state.pool.clone())
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Profile no longer exists".into()))?;
    let is_admin = profile.role.is_admin();

    let flags_repo = FeatureFlagRepository::new(state.pool.clone());
    let feature_set = feature_set_from_loads(
        flags_repo.list().await,
        flags_repo.list_access_for_user(auth.user_id).await,
        is_admin,
    );

    Ok(Json(ResolvedFeatures {
        features: feature_set.resolve_all(),
        is_admin: feature_set.is_admin(),
    }))
}

/// Failure of either load degrades to the empty set rather than failing
/// the whole request.
fn feature_set_from_loads(
    flags: Result<Vec<FeatureFlagEntity>, sqlx::Error>,
    overrides: Result<Vec<String>, sqlx::Error>,
    is_admin: bool,
) -> FeatureSet {
    match (flags, overrides) {
        (Ok(flags), Ok(overrides)) => FeatureSet::new(
            flags.into_iter().map(|f| {
                (
                    f.id,
                    FlagState {
                        enabled: f.is_enabled,
                        beta: f.is_beta,
                    },
                )
            }),
            overrides,
            is_admin,
        ),
        (Err(e), _) | (_, Err(e)) => {
            tracing::error!(error = %e, "Failed to load feature flags");
            FeatureSet::empty(is_admin)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn flag(id: &str, enabled: bool) -> FeatureFlagEntity {
        FeatureFlagEntity {
            id: id.to_string(),
            description: None,
            is_enabled: enabled,
            is_beta: false,
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_both_loads_ok_resolves_flags() {
        let set = feature_set_from_loads(
            Ok(vec![flag("dark_mode", true), flag("beta_feed", false)]),
            Ok(vec!["beta_feed".to_string()]),
            false,
        );
        let resolved = set.resolve_all();
        assert_eq!(resolved.get("dark_mode"), Some(&true));
        assert_eq!(resolved.get("beta_feed"), Some(&true));
    }

    #[test]
    fn test_flag_load_failure_degrades_to_empty_set() {
        let set = feature_set_from_loads(Err(sqlx::Error::PoolClosed), Ok(vec![]), false);
        assert!(set.resolve_all().is_empty());
    }

    #[test]
    fn test_override_load_failure_degrades_to_empty_set() {
        let set = feature_set_from_loads(
            Ok(vec![flag("dark_mode", true)]),
            Err(sqlx::Error::PoolClosed),
            false,
        );
        assert!(set.resolve_all().is_empty());
    }

    #[test]
    fn test_degraded_set_keeps_admin_bit() {
        let set = feature_set_from_loads(Err(sqlx::Error::PoolClosed), Ok(vec![]), true);
        assert!(set.is_admin());
    }
}
