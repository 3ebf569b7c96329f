//! Prompt and automation rule entities (database row mappings).

use chrono::{DateTime, Utc};
use domain::models::PromptType;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the user_prompts table.
#[derive(Debug, Clone, FromRow)]
pub struct UserPromptEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub prompt_type: PromptType,
    pub action_url: Option<String>,
    pub is_dismissed: bool,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<UserPromptEntity> for domain::models::UserPrompt {
    fn from(entity: UserPromptEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            title: entity.title,
            message: entity.message,
            prompt_type: entity.prompt_type,
            action_url: entity.action_url,
            is_dismissed: entity.is_dismissed,
            created_by: entity.created_by,
            created_at: entity.created_at,
        }
    }
}

/// Database row mapping for the automation_rules table.
#[derive(Debug, Clone, FromRow)]
pub struct AutomationRuleEntity {
    pub id: Uuid,
    pub trigger_type: String,
    pub title: String,
    pub message: String,
    pub prompt_type: PromptType,
    pub action_url: Option<String>,
    pub send_email: bool,
    pub email_subject: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AutomationRuleEntity> for domain::models::AutomationRule {
    fn from(entity: AutomationRuleEntity) -> Self {
        Self {
            id: entity.id,
            trigger_type: entity.trigger_type,
            title: entity.title,
            message: entity.message,
            prompt_type: entity.prompt_type,
            action_url: entity.action_url,
            send_email: entity.send_email,
            email_subject: entity.email_subject,
            is_active: entity.is_active,
            created_at: entity.created_at,
        }
    }
}
