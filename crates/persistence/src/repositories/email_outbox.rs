//! Email outbox repository for database operations.
//!
//! Sends are enqueued here and drained by a background job, so request
//! handlers never block on SMTP and transient relay failures are retried
//! with backoff.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EmailOutboxEntity;
use crate::metrics::QueryTimer;

const OUTBOX_COLUMNS: &str = "id, recipient, subject, body, template_type, triggered_by, \
     attempts, next_attempt_at, sent_at, last_error, created_at";

/// Repository for the email outbox queue.
#[derive(Clone)]
pub struct EmailOutboxRepository {
    pool: PgPool,
}

impl EmailOutboxRepository {
    /// Creates a new EmailOutboxRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Queue a message for delivery.
    pub async fn enqueue(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        template_type: &str,
        triggered_by: Option<Uuid>,
    ) -> Result<EmailOutboxEntity, sqlx::Error> {
        let timer = QueryTimer::new("enqueue_email");
        let result = sqlx::query_as::<_, EmailOutboxEntity>(&format!(
            r#"
            INSERT INTO email_outbox (recipient, subject, body, template_type, triggered_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {OUTBOX_COLUMNS}
            "#,
        ))
        .bind(recipient)
        .bind(subject)
        .bind(body)
        .bind(template_type)
        .bind(triggered_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Fetch a batch of due, undelivered messages. The row locks from
    /// SKIP LOCKED last only for this statement, so exactly-once delivery
    /// rests on running a single drainer per deployment.
    pub async fn fetch_due(
        &self,
        batch_size: i64,
        max_attempts: i32,
    ) -> Result<Vec<EmailOutboxEntity>, sqlx::Error> {
        let timer = QueryTimer::new("fetch_due_emails");
        let result = sqlx::query_as::<_, EmailOutboxEntity>(&format!(
            r#"
            SELECT {OUTBOX_COLUMNS}
            FROM email_outbox
            WHERE sent_at IS NULL
              AND attempts < $2
              AND next_attempt_at <= NOW()
            ORDER BY next_attempt_at ASC
            LIMIT $1
            FOR UPDATE SKIP LOCKED
            "#,
        ))
        .bind(batch_size)
        .bind(max_attempts)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark a message as delivered.
    pub async fn mark_sent(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_email_sent");
        let result = sqlx::query(
            "UPDATE email_outbox SET sent_at = NOW(), last_error = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Record a failed attempt and push the next one out with exponential
    /// backoff: 1, 2, 4, 8 minutes and so on, capped by attempt count.
    pub async fn mark_failed(&self, id: Uuid, error: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_email_failed");
        let result = sqlx::query(
            r#"
            UPDATE email_outbox
            SET attempts = attempts + 1,
                last_error = $2,
                next_attempt_at = NOW() + (INTERVAL '1 minute' * POWER(2, attempts))
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(error)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Undelivered messages still within their attempt budget.
    pub async fn count_pending(&self, max_attempts: i32) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_pending_emails");
        let result = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM email_outbox WHERE sent_at IS NULL AND attempts < $1",
        )
        .bind(max_attempts)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: EmailOutboxRepository tests require a database connection and
    // are covered by integration tests
}
