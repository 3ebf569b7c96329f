//! Campaign repository for database operations.

use domain::models::CampaignStatus;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CampaignEntity;
use crate::metrics::QueryTimer;

const CAMPAIGN_COLUMNS: &str =
    "id, advertiser_id, name, budget_cents, spent_cents, status, created_at, updated_at";

/// Repository for ad campaign database operations.
#[derive(Clone)]
pub struct CampaignRepository {
    pool: PgPool,
}

impl CampaignRepository {
    /// Creates a new CampaignRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a campaign in draft status.
    pub async fn create(
        &self,
        advertiser_id: Uuid,
        name: &str,
        budget_cents: i64,
    ) -> Result<CampaignEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_campaign");
        let result = sqlx::query_as::<_, CampaignEntity>(&format!(
            r#"
            INSERT INTO ad_campaigns (advertiser_id, name, budget_cents)
            VALUES ($1, $2, $3)
            RETURNING {CAMPAIGN_COLUMNS}
            "#,
        ))
        .bind(advertiser_id)
        .bind(name)
        .bind(budget_cents)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find campaign by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_campaign_by_id");
        let result = sqlx::query_as::<_, CampaignEntity>(&format!(
            "SELECT {CAMPAIGN_COLUMNS} FROM ad_campaigns WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List an advertiser's campaigns, newest first.
    pub async fn list_by_advertiser(
        &self,
        advertiser_id: Uuid,
    ) -> Result<Vec<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_campaigns_by_advertiser");
        let result = sqlx::query_as::<_, CampaignEntity>(&format!(
            r#"
            SELECT {CAMPAIGN_COLUMNS}
            FROM ad_campaigns
            WHERE advertiser_id = $1
            ORDER BY created_at DESC
            "#,
        ))
        .bind(advertiser_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update name and budget, keeping current values for absent fields.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        budget_cents: Option<i64>,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_campaign");
        let result = sqlx::query_as::<_, CampaignEntity>(&format!(
            r#"
            UPDATE ad_campaigns
            SET name = COALESCE($2, name),
                budget_cents = COALESCE($3, budget_cents),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(name)
        .bind(budget_cents)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Move a campaign to a new status. Transition validity is checked by
    /// the caller against the current status.
    pub async fn set_status(
        &self,
        id: Uuid,
        status: CampaignStatus,
    ) -> Result<Option<CampaignEntity>, sqlx::Error> {
        let timer = QueryTimer::new("set_campaign_status");
        let result = sqlx::query_as::<_, CampaignEntity>(&format!(
            r#"
            UPDATE ad_campaigns
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING {CAMPAIGN_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: CampaignRepository tests require a database connection and are
    // covered by integration tests
}
