//! Feature flag entities (database row mappings).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the feature_flags table.
#[derive(Debug, Clone, FromRow)]
pub struct FeatureFlagEntity {
    pub id: String,
    pub description: Option<String>,
    pub is_enabled: bool,
    pub is_beta: bool,
    pub updated_at: DateTime<Utc>,
}

impl From<FeatureFlagEntity> for domain::models::FeatureFlag {
    fn from(entity: FeatureFlagEntity) -> Self {
        Self {
            id: entity.id,
            description: entity.description,
            is_enabled: entity.is_enabled,
            is_beta: entity.is_beta,
            updated_at: entity.updated_at,
        }
    }
}

/// Database row mapping for the feature_access table.
#[derive(Debug, Clone, FromRow)]
pub struct FeatureAccessEntity {
    pub user_id: Uuid,
    pub feature_id: String,
    pub granted_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<FeatureAccessEntity> for domain::models::FeatureAccess {
    fn from(entity: FeatureAccessEntity) -> Self {
        Self {
            user_id: entity.user_id,
            feature_id: entity.feature_id,
            granted_by: entity.granted_by,
            created_at: entity.created_at,
        }
    }
}
