//! Verification token cleanup job.

use persistence::repositories::VerificationTokenRepository;
use sqlx::PgPool;

use crate::jobs::scheduler::{Job, JobFrequency};

/// Deletes expired and consumed verification tokens.
pub struct TokenCleanupJob {
    pool: PgPool,
}

impl TokenCleanupJob {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Job for TokenCleanupJob {
    fn name(&self) -> &'static str {
        "token_cleanup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Hourly
    }

    async fn execute(&self) -> Result<(), String> {
        let deleted = VerificationTokenRepository::new(self.pool.clone())
            .delete_expired()
            .await
            .map_err(|e| format!("Failed to delete expired tokens: {}", e))?;

        if deleted > 0 {
            tracing::info!(deleted, "Expired verification tokens removed");
        }
        Ok(())
    }
}
