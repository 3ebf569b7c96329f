//! Advertisement entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::ApprovalStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the advertisements table.
#[derive(Debug, Clone, FromRow)]
pub struct AdvertisementEntity {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub target_url: String,
    pub tags: Vec<String>,
    pub impressions: i64,
    pub clicks: i64,
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AdvertisementEntity> for domain::models::Advertisement {
    fn from(entity: AdvertisementEntity) -> Self {
        Self {
            id: entity.id,
            campaign_id: entity.campaign_id,
            title: entity.title,
            image_url: entity.image_url,
            target_url: entity.target_url,
            tags: entity.tags,
            impressions: entity.impressions,
            clicks: entity.clicks,
            approval_status: entity.approval_status,
            rejection_reason: entity.rejection_reason,
            archived_at: entity.archived_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
