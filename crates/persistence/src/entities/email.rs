//! Email audit log and outbox entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::EmailStatus;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the email_log table.
#[derive(Debug, Clone, FromRow)]
pub struct EmailLogEntity {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub status: EmailStatus,
    pub template_type: String,
    pub triggered_by: Option<Uuid>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<EmailLogEntity> for domain::models::EmailLog {
    fn from(entity: EmailLogEntity) -> Self {
        Self {
            id: entity.id,
            recipient: entity.recipient,
            subject: entity.subject,
            status: entity.status,
            template_type: entity.template_type,
            triggered_by: entity.triggered_by,
            error: entity.error,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the email_outbox table.
///
/// Rows are drained by the single outbox job instance; a row counts as
/// pending while sent_at is null and attempts is under the cap.
#[derive(Debug, Clone, FromRow)]
pub struct EmailOutboxEntity {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub template_type: String,
    pub triggered_by: Option<Uuid>,
    pub attempts: i32,
    pub next_attempt_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
}
