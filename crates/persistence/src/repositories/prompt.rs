//! User prompt repository for database operations.

use domain::models::PromptType;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::UserPromptEntity;
use crate::metrics::QueryTimer;

const PROMPT_COLUMNS: &str =
    "id, user_id, title, message, prompt_type, action_url, is_dismissed, created_by, created_at";

/// Repository for in-app prompt database operations.
#[derive(Clone)]
pub struct PromptRepository {
    pool: PgPool,
}

impl PromptRepository {
    /// Creates a new PromptRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a prompt. `created_by` is None for automation-created prompts.
    pub async fn create(
        &self,
        user_id: Uuid,
        title: &str,
        message: &str,
        prompt_type: PromptType,
        action_url: Option<&str>,
        created_by: Option<Uuid>,
    ) -> Result<UserPromptEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_prompt");
        let result = sqlx::query_as::<_, UserPromptEntity>(&format!(
            r#"
            INSERT INTO user_prompts (user_id, title, message, prompt_type, action_url, created_by)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PROMPT_COLUMNS}
            "#,
        ))
        .bind(user_id)
        .bind(title)
        .bind(message)
        .bind(prompt_type)
        .bind(action_url)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Undismissed prompts for a user, newest first.
    pub async fn list_active_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<UserPromptEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_active_prompts");
        let result = sqlx::query_as::<_, UserPromptEntity>(&format!(
            r#"
            SELECT {PROMPT_COLUMNS}
            FROM user_prompts
            WHERE user_id = $1 AND is_dismissed = false
            ORDER BY created_at DESC
            "#,
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Dismiss one prompt. Scoped to the owning user so a caller cannot
    /// dismiss someone else's prompt.
    pub async fn dismiss(&self, id: Uuid, user_id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("dismiss_prompt");
        let result = sqlx::query(
            "UPDATE user_prompts SET is_dismissed = true WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Whether the user already has an undismissed prompt with this exact
    /// title. Automation uses this to avoid stacking duplicates.
    pub async fn has_active_with_title(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_active_prompt_title");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM user_prompts
                WHERE user_id = $1 AND title = $2 AND is_dismissed = false
            )
            "#,
        )
        .bind(user_id)
        .bind(title)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Auto-dismiss completeness nags once the profile is complete. Matches
    /// by title substring since admins may have reworded the rule.
    pub async fn dismiss_completion_prompts(
        &self,
        user_id: Uuid,
        title_fragment: &str,
    ) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("dismiss_completion_prompts");
        let result = sqlx::query(
            r#"
            UPDATE user_prompts
            SET is_dismissed = true
            WHERE user_id = $1 AND is_dismissed = false AND title ILIKE $2
            "#,
        )
        .bind(user_id)
        .bind(format!("%{}%", title_fragment))
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Hard-delete dismissed prompts. Admin housekeeping.
    pub async fn delete_dismissed(&self) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_dismissed_prompts");
        let result = sqlx::query("DELETE FROM user_prompts WHERE is_dismissed = true")
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: PromptRepository tests require a database connection and are
    // covered by integration tests
}
