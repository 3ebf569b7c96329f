//! Advertisement domain models and the approval workflow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Moderation status gating advertisement visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "approval_status", rename_all = "lowercase")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApprovalStatus {
    /// Only pending ads can be decided; decisions are final.
    pub fn can_decide(&self) -> bool {
        matches!(self, ApprovalStatus::Pending)
    }
}

impl std::fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApprovalStatus::Pending => write!(f, "pending"),
            ApprovalStatus::Approved => write!(f, "approved"),
            ApprovalStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// An advertisement creative belonging to a campaign.
///
/// `archived_at` is a soft-delete marker: archived ads keep their
/// impression/click counters but are excluded from serving and listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Advertisement {
    pub id: Uuid,
    pub campaign_id: Uuid,
    pub title: String,
    pub image_url: Option<String>,
    pub target_url: String,
    pub tags: Vec<String>,
    pub impressions: i64,
    pub clicks: i64,
    pub approval_status: ApprovalStatus,
    pub rejection_reason: Option<String>,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create an advertisement (enters the queue as pending).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateAdvertisementRequest {
    #[validate(length(min = 1, max = 160, message = "Title must be 1-160 characters"))]
    pub title: String,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "Invalid target URL"))]
    pub target_url: String,

    #[validate(length(max = 10, message = "At most 10 tags"))]
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request to update creative fields. Any change resets the ad to pending.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateAdvertisementRequest {
    #[validate(length(min = 1, max = 160, message = "Title must be 1-160 characters"))]
    pub title: Option<String>,

    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "Invalid target URL"))]
    pub target_url: Option<String>,

    #[validate(length(max = 10, message = "At most 10 tags"))]
    pub tags: Option<Vec<String>>,
}

/// Moderation decision on a pending advertisement.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct AdDecisionRequest {
    pub approve: bool,

    #[validate(length(max = 500, message = "Reason too long"))]
    pub reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_can_be_decided() {
        assert!(ApprovalStatus::Pending.can_decide());
        assert!(!ApprovalStatus::Approved.can_decide());
        assert!(!ApprovalStatus::Rejected.can_decide());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ApprovalStatus::Pending.to_string(), "pending");
        assert_eq!(ApprovalStatus::Approved.to_string(), "approved");
        assert_eq!(ApprovalStatus::Rejected.to_string(), "rejected");
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateAdvertisementRequest {
            title: "Try Mosaic Pro".to_string(),
            image_url: Some("https://cdn.example.com/ad.png".to_string()),
            target_url: "https://example.com/pro".to_string(),
            tags: vec!["saas".to_string()],
        };
        assert!(valid.validate().is_ok());

        let bad_url = CreateAdvertisementRequest {
            target_url: "not a url".to_string(),
            ..valid.clone()
        };
        assert!(bad_url.validate().is_err());

        let too_many_tags = CreateAdvertisementRequest {
            tags: (0..11).map(|i| format!("t{}", i)).collect(),
            ..valid
        };
        assert!(too_many_tags.validate().is_err());
    }

    #[test]
    fn test_decision_reason_length() {
        let decision = AdDecisionRequest {
            approve: false,
            reason: Some("x".repeat(501)),
        };
        assert!(decision.validate().is_err());
    }
}
