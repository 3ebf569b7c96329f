//! In-app user prompt models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Rendering style of a prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "prompt_type", rename_all = "lowercase")]
pub enum PromptType {
    Info,
    Action,
    Warning,
}

impl std::fmt::Display for PromptType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PromptType::Info => write!(f, "info"),
            PromptType::Action => write!(f, "action"),
            PromptType::Warning => write!(f, "warning"),
        }
    }
}

/// An in-app prompt shown to a user until dismissed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UserPrompt {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub message: String,
    pub prompt_type: PromptType,
    pub action_url: Option<String>,
    pub is_dismissed: bool,
    /// Admin who created the prompt; None when created by automation.
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Admin request to create a prompt for a user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreatePromptRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 160, message = "Title must be 1-160 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub message: String,

    pub prompt_type: PromptType,

    #[validate(url(message = "Invalid action URL"))]
    pub action_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_type_display() {
        assert_eq!(PromptType::Info.to_string(), "info");
        assert_eq!(PromptType::Action.to_string(), "action");
        assert_eq!(PromptType::Warning.to_string(), "warning");
    }

    #[test]
    fn test_create_prompt_validation() {
        let valid = CreatePromptRequest {
            user_id: Uuid::new_v4(),
            title: "Complete Your Profile".to_string(),
            message: "Add a bio or avatar so others can find you.".to_string(),
            prompt_type: PromptType::Action,
            action_url: Some("https://mosaic.app/settings".to_string()),
        };
        assert!(valid.validate().is_ok());

        let empty_title = CreatePromptRequest {
            title: "".to_string(),
            ..valid
        };
        assert!(empty_title.validate().is_err());
    }
}
