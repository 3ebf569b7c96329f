//! Profile repository for database operations.

use domain::models::ProfileRole;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::ProfileEntity;
use crate::metrics::QueryTimer;

const PROFILE_COLUMNS: &str = "id, username, display_name, email, password_hash, bio, avatar_url, \
     role, is_verified, is_banned, ad_credit_cents, created_at, updated_at";

/// Repository for profile-related database operations.
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new profile with the default user role.
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> Result<ProfileEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            INSERT INTO profiles (username, email, password_hash, display_name)
            VALUES ($1, $2, $3, $4)
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(display_name)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find profile by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_id");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find profile by email (login lookup).
    pub async fn find_by_email(&self, email: &str) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_profile_by_email");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles WHERE lower(email) = lower($1)",
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a username is taken.
    pub async fn username_exists(&self, username: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("check_username_exists");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM profiles WHERE lower(username) = lower($1))",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update self-service profile fields, keeping current values for
    /// fields not supplied.
    pub async fn update_profile(
        &self,
        id: Uuid,
        username: Option<&str>,
        display_name: Option<&str>,
        bio: Option<&str>,
        avatar_url: Option<&str>,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            UPDATE profiles
            SET username = COALESCE($2, username),
                display_name = COALESCE($3, display_name),
                bio = COALESCE($4, bio),
                avatar_url = COALESCE($5, avatar_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(username)
        .bind(display_name)
        .bind(bio)
        .bind(avatar_url)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Replace the stored password hash.
    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("update_profile_password");
        let result = sqlx::query(
            "UPDATE profiles SET password_hash = $2, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(password_hash)
        .execute(&self.pool)
        .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Admin update of role and moderation flags.
    pub async fn admin_update(
        &self,
        id: Uuid,
        role: Option<ProfileRole>,
        is_verified: Option<bool>,
        is_banned: Option<bool>,
    ) -> Result<Option<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("admin_update_profile");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            UPDATE profiles
            SET role = COALESCE($2, role),
                is_verified = COALESCE($3, is_verified),
                is_banned = COALESCE($4, is_banned),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PROFILE_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(role)
        .bind(is_verified)
        .bind(is_banned)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Mark a profile's email as verified.
    pub async fn mark_verified(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("mark_profile_verified");
        let result =
            sqlx::query("UPDATE profiles SET is_verified = true, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Paged admin listing with optional case-insensitive search over
    /// username, display name and email.
    pub async fn list_paged(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProfileEntity>, i64), sqlx::Error> {
        let timer = QueryTimer::new("list_profiles_paged");
        let pattern = search.map(|s| format!("%{}%", s));

        let rows = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM profiles
            WHERE $1::text IS NULL
               OR username ILIKE $1
               OR display_name ILIKE $1
               OR email ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        ))
        .bind(pattern.as_deref())
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM profiles
            WHERE $1::text IS NULL
               OR username ILIKE $1
               OR display_name ILIKE $1
               OR email ILIKE $1
            "#,
        )
        .bind(pattern.as_deref())
        .fetch_one(&self.pool)
        .await?;

        timer.record();
        Ok((rows, total))
    }

    /// List profiles that never verified their email.
    pub async fn list_unverified(&self, limit: i64) -> Result<Vec<ProfileEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_unverified_profiles");
        let result = sqlx::query_as::<_, ProfileEntity>(&format!(
            r#"
            SELECT {PROFILE_COLUMNS}
            FROM profiles
            WHERE is_verified = false
            ORDER BY created_at ASC
            LIMIT $1
            "#,
        ))
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a batch of profiles, returning how many rows went away.
    pub async fn bulk_delete(&self, ids: &[Uuid]) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("bulk_delete_profiles");
        let result = sqlx::query("DELETE FROM profiles WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Every avatar object key referenced by a profile. Used by the orphan
    /// media scan.
    pub async fn list_avatar_urls(&self) -> Result<Vec<String>, sqlx::Error> {
        let timer = QueryTimer::new("list_avatar_urls");
        let result = sqlx::query_scalar::<_, String>(
            "SELECT avatar_url FROM profiles WHERE avatar_url IS NOT NULL",
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}

#[cfg(test)]
mod tests {
    // Note: ProfileRepository tests require a database connection and are
    // covered by integration tests
}
