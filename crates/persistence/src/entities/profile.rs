//! Profile entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::ProfileRole;
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the profiles table.
#[derive(Debug, Clone, FromRow)]
pub struct ProfileEntity {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub role: ProfileRole,
    pub is_verified: bool,
    pub is_banned: bool,
    pub ad_credit_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProfileEntity> for domain::models::Profile {
    fn from(entity: ProfileEntity) -> Self {
        Self {
            id: entity.id,
            username: entity.username,
            display_name: entity.display_name,
            email: entity.email,
            bio: entity.bio,
            avatar_url: entity.avatar_url,
            role: entity.role,
            is_verified: entity.is_verified,
            is_banned: entity.is_banned,
            ad_credit_cents: entity.ad_credit_cents,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
