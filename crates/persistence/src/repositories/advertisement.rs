//! Advertisement repository for database operations.

use chrono::{DateTime, Utc};
use domain::models::ApprovalStatus;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AdvertisementEntity;
use crate::metrics::QueryTimer;

const AD_COLUMNS: &str = "id, campaign_id, title, image_url, target_url, tags, impressions, \
     clicks, approval_status, rejection_reason, archived_at, created_at, updated_at";

/// Repository for advertisement database operations.
#[derive(Clone)]
pub struct AdvertisementRepository {
    pool: PgPool,
}

impl AdvertisementRepository {
    /// Creates a new AdvertisementRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an advertisement; new creatives always enter the queue as
    /// pending.
    pub async fn create(
        &self,
        campaign_id: Uuid,
        title: &str,
        image_url: Option<&str>,
        target_url: &str,
        tags: &[String],
    ) -> Result<AdvertisementEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_advertisement");
        let result = sqlx::query_as::<_, AdvertisementEntity>(&format!(
            r#"
            INSERT INTO advertisements (campaign_id, title, image_url, target_url, tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {AD_COLUMNS}
            "#,
        ))
        .bind(campaign_id)
        .bind(title)
        .bind(image_url)
        .bind(target_url)
        .bind(tags)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find advertisement by ID, archived ones included.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AdvertisementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_advertisement_by_id");
        let result = sqlx::query_as::<_, AdvertisementEntity>(&format!(
            "SELECT {AD_COLUMNS} FROM advertisements WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List non-archived ads of a campaign, newest first.
    pub async fn list_by_campaign(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<AdvertisementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_advertisements_by_campaign");
        let result = sqlx::query_as::<_, AdvertisementEntity>(&format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM advertisements
            WHERE campaign_id = $1 AND archived_at IS NULL
            ORDER BY created_at DESC
            "#,
        ))
        .bind(campaign_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Moderation queue: pending, non-archived ads, oldest first.
    pub async fn list_pending(&self, limit: i64) -> Result<Vec<AdvertisementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_pending_advertisements");
        let result = sqlx::query_as::<_, AdvertisementEntity>(&format!(
            r#"
            SELECT {AD_COLUMNS}
            FROM advertisements
            WHERE approval_status = 'pending' AND archived_at IS NULL
            ORDER BY created_at ASC
            LIMIT $1
            "#,
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update creative fields. Any successful update resets the ad to
    /// pending and clears a previous rejection reason.
    pub async fn update_creative(
        &self,
        id: Uuid,
        title: Option<&str>,
        image_url: Option<&str>,
        target_url: Option<&str>,
        tags: Option<&[String]>,
    ) -> Result<Option<AdvertisementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_advertisement");
        let result = sqlx::query_as::<_, AdvertisementEntity>(&format!(
            r#"
            UPDATE advertisements
            SET title = COALESCE($2, title),
                image_url = COALESCE($3, image_url),
                target_url = COALESCE($4, target_url),
                tags = COALESCE($5, tags),
                approval_status = 'pending',
                rejection_reason = NULL,
                updated_at = NOW()
            WHERE id = $1 AND archived_at IS NULL
            RETURNING {AD_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(title)
        .bind(image_url)
        .bind(target_url)
        .bind(tags)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Record a moderation decision. Only pending ads are affected, so a
    /// stale decision on an already-decided ad is a no-op.
    pub async fn decide(
        &self,
        id: Uuid,
        status: ApprovalStatus,
        rejection_reason: Option<&str>,
    ) -> Result<Option<AdvertisementEntity>, sqlx::Error> {
        let timer = QueryTimer::new("decide_advertisement");
        let result = sqlx::query_as::<_, AdvertisementEntity>(&format!(
            r#"
            UPDATE advertisements
            SET approval_status = $2,
                rejection_reason = $3,
                updated_at = NOW()
            WHERE id = $1 AND approval_status = 'pending' AND archived_at IS NULL
            RETURNING {AD_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(status)
        .bind(rejection_reason)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Soft-delete an advertisement, keeping its counters.
    pub async fn archive(
        &self,
        id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("archive_advertisement");
        let result = sqlx::query(
            "UPDATE advertisements SET archived_at = $2, updated_at = NOW() \
             WHERE id = $1 AND archived_at IS NULL",
        )
        .bind(id)
        .bind(at)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Count one impression for a served ad.
    pub async fn record_impression(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("record_ad_impression");
        let result = sqlx::query(
            "UPDATE advertisements SET impressions = impressions + 1 \
             WHERE id = $1 AND approval_status = 'approved' AND archived_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Count one click-through for a served ad.
    pub async fn record_click(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("record_ad_click");
        let result = sqlx::query(
            "UPDATE advertisements SET clicks = clicks + 1 \
             WHERE id = $1 AND approval_status = 'approved' AND archived_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Every image object key referenced by an ad, archived ones included
    /// so the orphan scan never flags an image still attached to history.
    pub async fn list_image_urls(&self) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("list_ad_image_urls");
        let result = sqlx::query_scalar::<_, String>(
            "SELECT image_url FROM advertisements WHERE image_url IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: AdvertisementRepository tests require a database connection and
    // are covered by integration tests
}
