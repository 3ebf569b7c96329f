//! Ad campaign domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle status of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "campaign_status", rename_all = "lowercase")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Archived,
}

impl CampaignStatus {
    /// Valid transitions: draft -> active, active <-> paused, and any
    /// non-archived status -> archived. Archived is terminal.
    pub fn can_transition_to(&self, next: CampaignStatus) -> bool {
        use CampaignStatus::*;
        match (self, next) {
            (Draft, Active) => true,
            (Active, Paused) | (Paused, Active) => true,
            (Archived, _) => false,
            (_, Archived) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Active => write!(f, "active"),
            CampaignStatus::Paused => write!(f, "paused"),
            CampaignStatus::Archived => write!(f, "archived"),
        }
    }
}

/// An advertising campaign owning zero or more advertisements.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Campaign {
    pub id: Uuid,
    pub advertiser_id: Uuid,
    pub name: String,
    pub budget_cents: i64,
    pub spent_cents: i64,
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a campaign (always starts as draft).
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateCampaignRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_amount_cents"))]
    pub budget_cents: i64,
}

/// Request to update campaign fields.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateCampaignRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_amount_cents"))]
    pub budget_cents: Option<i64>,
}

/// Request to move a campaign to a new status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CampaignStatusRequest {
    pub status: CampaignStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_to_active() {
        assert!(CampaignStatus::Draft.can_transition_to(CampaignStatus::Active));
    }

    #[test]
    fn test_active_pause_resume() {
        assert!(CampaignStatus::Active.can_transition_to(CampaignStatus::Paused));
        assert!(CampaignStatus::Paused.can_transition_to(CampaignStatus::Active));
    }

    #[test]
    fn test_archive_from_any_live_status() {
        assert!(CampaignStatus::Draft.can_transition_to(CampaignStatus::Archived));
        assert!(CampaignStatus::Active.can_transition_to(CampaignStatus::Archived));
        assert!(CampaignStatus::Paused.can_transition_to(CampaignStatus::Archived));
    }

    #[test]
    fn test_archived_is_terminal() {
        for next in [
            CampaignStatus::Draft,
            CampaignStatus::Active,
            CampaignStatus::Paused,
            CampaignStatus::Archived,
        ] {
            assert!(!CampaignStatus::Archived.can_transition_to(next));
        }
    }

    #[test]
    fn test_draft_cannot_pause() {
        assert!(!CampaignStatus::Draft.can_transition_to(CampaignStatus::Paused));
    }

    #[test]
    fn test_no_self_transition() {
        assert!(!CampaignStatus::Active.can_transition_to(CampaignStatus::Active));
        assert!(!CampaignStatus::Draft.can_transition_to(CampaignStatus::Draft));
    }

    #[test]
    fn test_create_request_validation() {
        let valid = CreateCampaignRequest {
            name: "Spring launch".to_string(),
            budget_cents: 50_000,
        };
        assert!(valid.validate().is_ok());

        let zero_budget = CreateCampaignRequest {
            name: "Spring launch".to_string(),
            budget_cents: 0,
        };
        assert!(zero_budget.validate().is_err());

        let empty_name = CreateCampaignRequest {
            name: "".to_string(),
            budget_cents: 100,
        };
        assert!(empty_name.validate().is_err());
    }
}
