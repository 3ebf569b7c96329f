//! Campaign entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::CampaignStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the ad_campaigns table.
#[derive(Debug, Clone, FromRow)]
pub struct CampaignEntity {
    pub id: Uuid,
    pub advertiser_id: Uuid,
    pub name: String,
    pub budget_cents: i64,
    pub spent_cents: i64,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<CampaignEntity> for domain::models::Campaign {
    fn from(entity: CampaignEntity) -> Self {
        Self {
            id: entity.id,
            advertiser_id: entity.advertiser_id,
            name: entity.name,
            budget_cents: entity.budget_cents,
            spent_cents: entity.spent_cents,
            status: entity.status,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
