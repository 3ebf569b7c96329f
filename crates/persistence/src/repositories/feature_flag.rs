//! Feature flag repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{FeatureAccessEntity, FeatureFlagEntity};
use crate::metrics::QueryTimer;

const FLAG_COLUMNS: &str = "id, description, is_enabled, is_beta, updated_at";
const ACCESS_COLUMNS: &str = "user_id, feature_id, granted_by, created_at";

/// Repository for feature flag database operations.
#[derive(Clone)]
pub struct FeatureFlagRepository {
    pool: PgPool,
}

impl FeatureFlagRepository {
    /// Creates a new FeatureFlagRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create or update a flag. The id must already be case-normalized.
    pub async fn upsert(
        &self,
        id: &str,
        description: Option<&str>,
        is_enabled: bool,
        is_beta: bool,
    ) -> Result<FeatureFlagEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_feature_flag");
        let result = sqlx::query_as::<_, FeatureFlagEntity>(&format!(
            r#"
            INSERT INTO feature_flags (id, description, is_enabled, is_beta, updated_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (id) DO UPDATE SET
                description = EXCLUDED.description,
                is_enabled = EXCLUDED.is_enabled,
                is_beta = EXCLUDED.is_beta,
                updated_at = NOW()
            RETURNING {FLAG_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(description)
        .bind(is_enabled)
        .bind(is_beta)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All flags, for the admin panel and for building feature sets.
    pub async fn list(&self) -> Result<Vec<FeatureFlagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_feature_flags");
        let result = sqlx::query_as::<_, FeatureFlagEntity>(&format!(
            "SELECT {FLAG_COLUMNS} FROM feature_flags ORDER BY id ASC",
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a flag. Override rows go with it via the foreign key.
    pub async fn delete(&self, id: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_feature_flag");
        let result = sqlx::query("DELETE FROM feature_flags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Grant a user access to a feature. Granting twice is a no-op.
    pub async fn grant_access(
        &self,
        user_id: Uuid,
        feature_id: &str,
        granted_by: Uuid,
    ) -> Result<Option<FeatureAccessEntity>, sqlx::Error> {
        let timer = QueryTimer::new("grant_feature_access");
        let result = sqlx::query_as::<_, FeatureAccessEntity>(&format!(
            r#"
            INSERT INTO feature_access (user_id, feature_id, granted_by)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, feature_id) DO NOTHING
            RETURNING {ACCESS_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(feature_id)
        .bind(granted_by)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Revoke a user's access to a feature.
    pub async fn revoke_access(&self, user_id: Uuid, feature_id: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("revoke_feature_access");
        let result =
            sqlx::query("DELETE FROM feature_access WHERE user_id = $1 AND feature_id = $2")
                .bind(user_id)
                .bind(feature_id)
                .execute(&self.pool)
                .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Feature ids a user has been granted individually.
    pub async fn list_access_for_user(&self, user_id: Uuid) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("list_feature_access_for_user");
        let result = sqlx::query_scalar::<_, String>(
            "SELECT feature_id FROM feature_access WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All override rows for one feature, for the admin panel.
    pub async fn list_access_for_feature(
        &self,
        feature_id: &str,
    ) -> Result<Vec<FeatureAccessEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_feature_access_for_feature");
        let result = sqlx::query_as::<_, FeatureAccessEntity>(&format!(
            "SELECT {ACCESS_COLUMNS} FROM feature_access \
             WHERE feature_id = $1 ORDER BY created_at DESC",
        ))
        .bind(feature_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: FeatureFlagRepository tests require a database connection and
    // are covered by integration tests
}
