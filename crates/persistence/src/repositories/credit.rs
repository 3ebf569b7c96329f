//! Credit request repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::CreditRequestEntity;
use crate::metrics::QueryTimer;

const CREDIT_COLUMNS: &str =
    "id, advertiser_id, amount_cents, status, decided_by, decided_at, created_at";

/// Repository for ad credit request database operations.
#[derive(Clone)]
pub struct CreditRepository {
    pool: PgPool,
}

impl CreditRepository {
    /// Creates a new CreditRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a pending credit request.
    pub async fn create(
        &self,
        advertiser_id: Uuid,
        amount_cents: i64,
    ) -> Result<CreditRequestEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_credit_request");
        let result = sqlx::query_as::<_, CreditRequestEntity>(&format!(
            r#"
            INSERT INTO credit_requests (advertiser_id, amount_cents)
            VALUES ($1, $2)
            RETURNING {CREDIT_COLUMNS}
            "#,
        ))
        .bind(advertiser_id)
        .bind(amount_cents)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find credit request by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<CreditRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_credit_request_by_id");
        let result = sqlx::query_as::<_, CreditRequestEntity>(&format!(
            "SELECT {CREDIT_COLUMNS} FROM credit_requests WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List an advertiser's credit requests, newest first.
    pub async fn list_by_advertiser(
        &self,
        advertiser_id: Uuid,
    ) -> Result<Vec<CreditRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_credit_requests_by_advertiser");
        let result = sqlx::query_as::<_, CreditRequestEntity>(&format!(
            r#"
            SELECT {CREDIT_COLUMNS}
            FROM credit_requests
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

    /// Admin queue of pending requests, oldest first.
    pub async fn list_pending(&self, limit: i64) -> Result<Vec<CreditRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_pending_credit_requests");
        let result = sqlx::query_as::<_, CreditRequestEntity>(&format!(
            r#"
            SELECT {CREDIT_COLUMNS}
            FROM credit_requests
            WHERE status = 'pending'
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

    /// Approve a pending request and credit the advertiser's wallet in one
    /// transaction. Returns None when the request was not pending, in which
    /// case nothing is committed.
    pub async fn approve(
        &self,
        id: Uuid,
        decided_by: Uuid,
    ) -> Result<Option<CreditRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("approve_credit_request");
        let mut tx = self.pool.begin().await?;

        let request = sqlx::query_as::<_, CreditRequestEntity>(&format!(
            r#"
            UPDATE credit_requests
            SET status = 'approved', decided_by = $2, decided_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {CREDIT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(decided_by)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(request) = request else {
            tx.rollback().await?;
            timer.record();
            return Ok(None);
        };

        sqlx::query(
            "UPDATE profiles SET ad_credit_cents = ad_credit_cents + $2, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(request.advertiser_id)
        .bind(request.amount_cents)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        timer.record();
        Ok(Some(request))
    }

    /// Reject a pending request. The wallet is untouched.
    pub async fn reject(
        &self,
        id: Uuid,
        decided_by: Uuid,
    ) -> Result<Option<CreditRequestEntity>, sqlx::Error> {
        let timer = QueryTimer::new("reject_credit_request");
        let result = sqlx::query_as::<_, CreditRequestEntity>(&format!(
            r#"
            UPDATE credit_requests
            SET status = 'rejected', decided_by = $2, decided_at = NOW()
            WHERE id = $1 AND status = 'pending'
            RETURNING {CREDIT_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(decided_by)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: CreditRepository tests require a database connection and are
    // covered by integration tests
}
