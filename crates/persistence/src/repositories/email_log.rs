//! Email audit log repository for database operations.

use domain::models::{EmailStats, EmailStatus};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::EmailLogEntity;
use crate::metrics::QueryTimer;

const LOG_COLUMNS: &str =
    "id, recipient, subject, status, template_type, triggered_by, error, created_at";

/// Repository for the append-only email audit log.
#[derive(Clone)]
pub struct EmailLogRepository {
    pool: PgPool,
}

impl EmailLogRepository {
    /// Creates a new EmailLogRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record one delivery attempt, success or failure.
    pub async fn insert(
        &self,
        recipient: &str,
        subject: &str,
        status: EmailStatus,
        template_type: &str,
        triggered_by: Option<Uuid>,
        error: Option<&str>,
    ) -> Result<EmailLogEntity, sqlx::Error> {
        let timer = QueryTimer::new("insert_email_log");
        let result = sqlx::query_as::<_, EmailLogEntity>(&format!(
            r#"
            INSERT INTO email_log (recipient, subject, status, template_type, triggered_by, error)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {LOG_COLUMNS}
            "#,
        ))
        .bind(recipient)
        .bind(subject)
        .bind(status)
        .bind(template_type)
        .bind(triggered_by)
        .bind(error)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Most recent log entries for the admin dashboard.
    pub async fn history(&self, limit: i64) -> Result<Vec<EmailLogEntity>, sqlx::Error> {
        let timer = QueryTimer::new("email_log_history");
        let result = sqlx::query_as::<_, EmailLogEntity>(&format!(
            "SELECT {LOG_COLUMNS} FROM email_log ORDER BY created_at DESC LIMIT $1",
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Total/sent/failed counts in one aggregate pass, so the three numbers
    /// always describe the same snapshot.
    pub async fn stats(&self) -> Result<EmailStats, sqlx::Error> {
        let timer = QueryTimer::new("email_log_stats");
        let result = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                COUNT(*),
                COUNT(*) FILTER (WHERE status = 'sent'),
                COUNT(*) FILTER (WHERE status = 'failed')
            FROM email_log
            "#,
        )
        .fetch_one(&self.pool)
        .await;
        timer.record();
        let (total, sent, failed) = result?;
        Ok(EmailStats {
            total,
            sent,
            failed,
        })
    }
}

#[cfg(test)]
mod tests {
    // Note: EmailLogRepository tests require a database connection and are
    // covered by integration tests
}
