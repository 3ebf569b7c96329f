//! Automation rule repository for database operations.

use domain::models::PromptType;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AutomationRuleEntity;
use crate::metrics::QueryTimer;

const RULE_COLUMNS: &str = "id, trigger_type, title, message, prompt_type, action_url, \
     send_email, email_subject, is_active, created_at";

/// Repository for automation rule database operations.
#[derive(Clone)]
pub struct AutomationRuleRepository {
    pool: PgPool,
}

impl AutomationRuleRepository {
    /// Creates a new AutomationRuleRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create or replace the rule for a trigger type. One rule per trigger.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        &self,
        trigger_type: &str,
        title: &str,
        message: &str,
        prompt_type: PromptType,
        action_url: Option<&str>,
        send_email: bool,
        email_subject: Option<&str>,
        is_active: bool,
    ) -> Result<AutomationRuleEntity, sqlx::Error> {
        let timer = QueryTimer::new("upsert_automation_rule");
        let result = sqlx::query_as::<_, AutomationRuleEntity>(&format!(
            r#"
            INSERT INTO automation_rules
                (trigger_type, title, message, prompt_type, action_url,
                 send_email, email_subject, is_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (trigger_type) DO UPDATE SET
                title = EXCLUDED.title,
                message = EXCLUDED.message,
                prompt_type = EXCLUDED.prompt_type,
                action_url = EXCLUDED.action_url,
                send_email = EXCLUDED.send_email,
                email_subject = EXCLUDED.email_subject,
                is_active = EXCLUDED.is_active
            RETURNING {RULE_COLUMNS}
            "#,
        ))
        .bind(trigger_type)
        .bind(title)
        .bind(message)
        .bind(prompt_type)
        .bind(action_url)
        .bind(send_email)
        .bind(email_subject)
        .bind(is_active)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// All rules, active or not, for the admin panel.
    pub async fn list(&self) -> Result<Vec<AutomationRuleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_automation_rules");
        let result = sqlx::query_as::<_, AutomationRuleEntity>(&format!(
            "SELECT {RULE_COLUMNS} FROM automation_rules ORDER BY trigger_type ASC",
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// The active rule for a trigger type, if any.
    pub async fn find_active_by_trigger(
        &self,
        trigger_type: &str,
    ) -> Result<Option<AutomationRuleEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_active_rule_by_trigger");
        let result = sqlx::query_as::<_, AutomationRuleEntity>(&format!(
            "SELECT {RULE_COLUMNS} FROM automation_rules \
             WHERE trigger_type = $1 AND is_active = true",
        ))
        .bind(trigger_type)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a rule.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_automation_rule");
        let result = sqlx::query("DELETE FROM automation_rules WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    // Note: AutomationRuleRepository tests require a database connection and
    // are covered by integration tests
}
