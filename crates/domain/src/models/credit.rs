//! Ad credit requests and wallet transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Status of an ad credit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "credit_status", rename_all = "lowercase")]
pub enum CreditStatus {
    Pending,
    Approved,
    Rejected,
}

impl CreditStatus {
    pub fn can_decide(&self) -> bool {
        matches!(self, CreditStatus::Pending)
    }
}

impl std::fmt::Display for CreditStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditStatus::Pending => write!(f, "pending"),
            CreditStatus::Approved => write!(f, "approved"),
            CreditStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// An advertiser's request to add credit to their wallet.
///
/// Approval credits the wallet and records the decision in one database
/// transaction; there is no application-level balance arithmetic outside it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CreditRequest {
    pub id: Uuid,
    pub advertiser_id: Uuid,
    pub amount_cents: i64,
    pub status: CreditStatus,
    pub decided_by: Option<Uuid>,
    pub decided_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl CreditRequest {
    /// Invoice number derived from the request id, stable across renders.
    pub fn invoice_number(&self) -> String {
        let raw = self.id.simple().to_string();
        format!("INV-{}", &raw[..8].to_uppercase())
    }
}

/// Request to create a credit request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateCreditRequest {
    #[validate(custom(function = "shared::validation::validate_amount_cents"))]
    pub amount_cents: i64,
}

/// Admin decision on a pending credit request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CreditDecisionRequest {
    pub approve: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_can_be_decided() {
        assert!(CreditStatus::Pending.can_decide());
        assert!(!CreditStatus::Approved.can_decide());
        assert!(!CreditStatus::Rejected.can_decide());
    }

    #[test]
    fn test_invoice_number_is_stable() {
        let request = CreditRequest {
            id: Uuid::parse_str("a1b2c3d4-0000-0000-0000-000000000000").unwrap(),
            advertiser_id: Uuid::new_v4(),
            amount_cents: 15000,
            status: CreditStatus::Approved,
            decided_by: None,
            decided_at: None,
            created_at: Utc::now(),
        };
        assert_eq!(request.invoice_number(), "INV-A1B2C3D4");
        assert_eq!(request.invoice_number(), request.invoice_number());
    }

    #[test]
    fn test_amount_must_be_positive() {
        assert!(CreateCreditRequest { amount_cents: 0 }.validate().is_err());
        assert!(CreateCreditRequest { amount_cents: -50 }.validate().is_err());
        assert!(CreateCreditRequest {
            amount_cents: 15000
        }
        .validate()
        .is_ok());
    }
}
