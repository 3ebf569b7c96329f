//! Profile domain models and account requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Platform role attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "profile_role", rename_all = "lowercase")]
pub enum ProfileRole {
    User,
    Advertiser,
    Moderator,
    Admin,
}

impl ProfileRole {
    /// Whether this role may access the admin back office.
    pub fn is_admin(&self) -> bool {
        matches!(self, ProfileRole::Admin)
    }

    /// Whether this role may moderate content (ad approval, prompts).
    pub fn can_moderate(&self) -> bool {
        matches!(self, ProfileRole::Moderator | ProfileRole::Admin)
    }
}

impl std::fmt::Display for ProfileRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileRole::User => write!(f, "user"),
            ProfileRole::Advertiser => write!(f, "advertiser"),
            ProfileRole::Moderator => write!(f, "moderator"),
            ProfileRole::Admin => write!(f, "admin"),
        }
    }
}

/// A user profile.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Profile {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: ProfileRole,
    pub is_verified: bool,
    pub is_banned: bool,
    pub ad_credit_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// A profile is complete when it has a username plus at least one of
    /// bio, display name or avatar. Used by the incomplete-profile nag.
    pub fn is_complete(&self) -> bool {
        let has = |s: &Option<String>| s.as_deref().is_some_and(|v| !v.trim().is_empty());
        !self.username.trim().is_empty()
            && (has(&self.bio) || has(&self.display_name) || has(&self.avatar_url))
    }
}

/// Request to register a new account.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct RegisterRequest {
    #[validate(custom(function = "shared::validation::validate_username"))]
    pub username: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(min = 12, max = 128, message = "Password must be 12-128 characters"))]
    pub password: String,

    #[validate(length(max = 80, message = "Display name too long"))]
    pub display_name: Option<String>,
}

/// Request to log in with email and password.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token pair issued on login/refresh.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

/// Self-service profile update.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "shared::validation::validate_username"))]
    pub username: Option<String>,

    #[validate(length(max = 80, message = "Display name too long"))]
    pub display_name: Option<String>,

    #[validate(length(max = 500, message = "Bio too long"))]
    pub bio: Option<String>,

    #[validate(url(message = "Invalid avatar URL"))]
    pub avatar_url: Option<String>,
}

/// Password change request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdatePasswordRequest {
    pub current_password: String,

    #[validate(length(min = 12, max = 128, message = "Password must be 12-128 characters"))]
    pub new_password: String,
}

/// Admin update of moderation fields on a profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdminUpdateProfileRequest {
    pub role: Option<ProfileRole>,
    pub is_verified: Option<bool>,
    pub is_banned: Option<bool>,
}

/// Bulk delete request for the admin user screen.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct BulkDeleteUsersRequest {
    #[validate(length(min = 1, max = 100, message = "user_ids must contain 1-100 entries"))]
    pub user_ids: Vec<Uuid>,
}

/// Response for the username availability probe.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct UsernameAvailability {
    pub username: String,
    pub available: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_profile() -> Profile {
        Profile {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            display_name: None,
            email: "alice@example.com".to_string(),
            bio: None,
            avatar_url: None,
            role: ProfileRole::User,
            is_verified: false,
            is_banned: false,
            ad_credit_cents: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_profile_with_only_username_is_incomplete() {
        let profile = base_profile();
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_profile_with_empty_strings_is_incomplete() {
        let mut profile = base_profile();
        profile.bio = Some("".to_string());
        profile.display_name = Some("   ".to_string());
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_profile_with_display_name_is_complete() {
        let mut profile = base_profile();
        profile.display_name = Some("Alice".to_string());
        assert!(profile.is_complete());
    }

    #[test]
    fn test_profile_with_bio_is_complete() {
        let mut profile = base_profile();
        profile.bio = Some("Hello there".to_string());
        assert!(profile.is_complete());
    }

    #[test]
    fn test_profile_with_avatar_is_complete() {
        let mut profile = base_profile();
        profile.avatar_url = Some("https://cdn.example.com/a.png".to_string());
        assert!(profile.is_complete());
    }

    #[test]
    fn test_profile_without_username_is_incomplete() {
        let mut profile = base_profile();
        profile.username = "".to_string();
        profile.bio = Some("Hello".to_string());
        assert!(!profile.is_complete());
    }

    #[test]
    fn test_role_permissions() {
        assert!(ProfileRole::Admin.is_admin());
        assert!(!ProfileRole::Moderator.is_admin());
        assert!(ProfileRole::Moderator.can_moderate());
        assert!(ProfileRole::Admin.can_moderate());
        assert!(!ProfileRole::Advertiser.can_moderate());
        assert!(!ProfileRole::User.can_moderate());
    }

    #[test]
    fn test_register_request_validation() {
        let valid = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "a-long-enough-password".to_string(),
            display_name: None,
        };
        assert!(valid.validate().is_ok());

        let bad_username = RegisterRequest {
            username: "Alice!".to_string(),
            ..valid.clone()
        };
        assert!(bad_username.validate().is_err());

        let short_password = RegisterRequest {
            password: "short".to_string(),
            ..valid
        };
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(ProfileRole::User.to_string(), "user");
        assert_eq!(ProfileRole::Advertiser.to_string(), "advertiser");
        assert_eq!(ProfileRole::Moderator.to_string(), "moderator");
        assert_eq!(ProfileRole::Admin.to_string(), "admin");
    }
}
