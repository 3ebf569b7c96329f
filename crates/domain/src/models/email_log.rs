//! Email audit log models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Outcome of a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "email_status", rename_all = "lowercase")]
pub enum EmailStatus {
    Sent,
    Failed,
}

impl std::fmt::Display for EmailStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailStatus::Sent => write!(f, "sent"),
            EmailStatus::Failed => write!(f, "failed"),
        }
    }
}

/// One row of the append-only email audit trail.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EmailLog {
    pub id: Uuid,
    pub recipient: String,
    pub subject: String,
    pub status: EmailStatus,
    pub template_type: String,
    /// Actor that caused the send; None for automation.
    pub triggered_by: Option<Uuid>,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Dashboard counts, computed in a single aggregate query so the three
/// numbers are mutually consistent.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct EmailStats {
    pub total: i64,
    pub sent: i64,
    pub failed: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(EmailStatus::Sent.to_string(), "sent");
        assert_eq!(EmailStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&EmailStatus::Failed).unwrap(),
            "\"failed\""
        );
    }
}
