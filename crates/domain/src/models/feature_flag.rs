//! Feature flag models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A globally-defaulted feature toggle. Ids are stored lower-cased.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FeatureFlag {
    pub id: String,
    pub description: Option<String>,
    pub is_enabled: bool,
    pub is_beta: bool,
    pub updated_at: DateTime<Utc>,
}

/// A per-user override row; its presence grants access to the feature.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FeatureAccess {
    pub user_id: Uuid,
    pub feature_id: String,
    pub granted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Request to create or update a flag.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertFlagRequest {
    #[validate(length(min = 1, max = 64, message = "Feature id must be 1-64 characters"))]
    pub id: String,

    #[validate(length(max = 300, message = "Description too long"))]
    pub description: Option<String>,

    #[serde(default)]
    pub is_enabled: bool,

    #[serde(default)]
    pub is_beta: bool,
}

impl UpsertFlagRequest {
    /// Flag ids are case-normalized before storage and lookup.
    pub fn normalized_id(&self) -> String {
        self.id.to_lowercase()
    }
}

/// Request to grant a user access to a feature.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct GrantAccessRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 64, message = "Feature id must be 1-64 characters"))]
    pub feature_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_id_normalization() {
        let request = UpsertFlagRequest {
            id: "Dark_Mode".to_string(),
            description: None,
            is_enabled: true,
            is_beta: false,
        };
        assert_eq!(request.normalized_id(), "dark_mode");
    }
}
