//! Prompt automation rules.
//!
//! A rule maps a trigger event to an in-app prompt and, optionally, a
//! transactional email. Trigger types are free-form strings so admins can
//! introduce new events without a deploy; well-known triggers get constants.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::prompt::PromptType;

/// Trigger fired after account registration.
pub const TRIGGER_SIGNUP: &str = "signup";

/// Trigger fired when a profile is (re)evaluated for completeness.
/// Has special handling: a complete profile auto-dismisses the nag.
pub const TRIGGER_INCOMPLETE_PROFILE: &str = "incomplete_profile";

/// Prompt title substring used to recognize completeness nags on dismissal.
pub const COMPLETE_PROFILE_TITLE: &str = "complete your profile";

/// An admin-configured automation rule.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct AutomationRule {
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

/// Request to create or replace an automation rule.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpsertRuleRequest {
    #[validate(length(min = 1, max = 64, message = "Trigger type must be 1-64 characters"))]
    pub trigger_type: String,

    #[validate(length(min = 1, max = 160, message = "Title must be 1-160 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 1000, message = "Message must be 1-1000 characters"))]
    pub message: String,

    pub prompt_type: PromptType,

    #[validate(url(message = "Invalid action URL"))]
    pub action_url: Option<String>,

    #[serde(default)]
    pub send_email: bool,

    #[validate(length(max = 200, message = "Email subject too long"))]
    pub email_subject: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Manual trigger request for the admin panel.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct TriggerRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 64, message = "Trigger type must be 1-64 characters"))]
    pub trigger_type: String,

    /// Optional override for the email recipient.
    #[validate(email(message = "Invalid email address"))]
    pub recipient_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_defaults() {
        let json = r#"{
            "trigger_type": "signup",
            "title": "Welcome to Mosaic",
            "message": "Have a look around.",
            "prompt_type": "info"
        }"#;
        let request: UpsertRuleRequest = serde_json::from_str(json).unwrap();
        assert!(request.is_active);
        assert!(!request.send_email);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_trigger_constants_are_lowercase() {
        assert_eq!(TRIGGER_SIGNUP, TRIGGER_SIGNUP.to_lowercase());
        assert_eq!(
            TRIGGER_INCOMPLETE_PROFILE,
            TRIGGER_INCOMPLETE_PROFILE.to_lowercase()
        );
    }
}
