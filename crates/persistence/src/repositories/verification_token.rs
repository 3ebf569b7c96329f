//! Verification token repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::VerificationTokenEntity;
use crate::metrics::QueryTimer;

const TOKEN_COLUMNS: &str = "id, user_id, token_hash, expires_at, used_at, created_at";

/// Repository for email verification token database operations.
#[derive(Clone)]
pub struct VerificationTokenRepository {
    pool: PgPool,
}

impl VerificationTokenRepository {
    /// Creates a new VerificationTokenRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store the hash of a freshly issued token.
    pub async fn create(
        &self,
        user_id: Uuid,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<VerificationTokenEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_verification_token");
        let result = sqlx::query_as::<_, VerificationTokenEntity>(&format!(
            r#"
            INSERT INTO verification_tokens (user_id, token_hash, expires_at)
            VALUES ($1, $2, $3)
            RETURNING {TOKEN_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Look a token up by its hash.
    pub async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<VerificationTokenEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_verification_token");
        let result = sqlx::query_as::<_, VerificationTokenEntity>(&format!(
            "SELECT {TOKEN_COLUMNS} FROM verification_tokens WHERE token_hash = $1",
        ))
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Consume a token. Only unused tokens are affected, so replaying a
    /// token is visible as zero rows.
    pub async fn mark_used(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_verification_token_used");
        let result = sqlx::query(
            "UPDATE verification_tokens SET used_at = NOW() WHERE id = $1 AND used_at IS NULL",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Drop expired tokens. Called from the housekeeping job.
    pub async fn delete_expired(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_expired_verification_tokens");
        let result = sqlx::query("DELETE FROM verification_tokens WHERE expires_at <= NOW()")
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: VerificationTokenRepository tests require a database connection
    // and are covered by integration tests
}
