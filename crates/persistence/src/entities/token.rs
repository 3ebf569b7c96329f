//! Verification token entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the verification_tokens table. Only the SHA-256
/// hash of the token is stored.
#[derive(Debug, Clone, FromRow)]
pub struct VerificationTokenEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl VerificationTokenEntity {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }

    pub fn is_used(&self) -> bool {
        self.used_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn token(expires_in: Duration) -> VerificationTokenEntity {
        VerificationTokenEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            token_hash: "abc".to_string(),
            expires_at: Utc::now() + expires_in,
            used_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_expiry() {
        assert!(!token(Duration::hours(1)).is_expired(Utc::now()));
        assert!(token(Duration::hours(-1)).is_expired(Utc::now()));
    }

    #[test]
    fn test_used() {
        let mut t = token(Duration::hours(1));
        assert!(!t.is_used());
        t.used_at = Some(Utc::now());
        assert!(t.is_used());
    }
}
