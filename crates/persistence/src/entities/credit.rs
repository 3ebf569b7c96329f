//! Credit request entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::CreditStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the credit_requests table.
#[derive(Debug, Clone, FromRow)]
pub struct CreditRequestEntity {
    pub id: Uuid,
    pub advertiser_id: Uuid,
    pub amount_cents: i64,
    pub status: CreditStatus,
    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<CreditRequestEntity> for domain::models::CreditRequest {
    fn from(entity: CreditRequestEntity) -> Self {
        Self {
            id: entity.id,
            advertiser_id: entity.advertiser_id,
            amount_cents: entity.amount_cents,
            status: entity.status,
            decided_by: entity.decided_by,
            decided_at: entity.decided_at,
            created_at: entity.created_at,
        }
    }
}
