//! Read-only table browser for the admin back office.
//!
//! Tables are whitelisted and rows are serialized server-side with
//! `to_jsonb`, which handles enums, arrays and timestamps uniformly.
//! Secret columns are stripped from the JSON before it leaves the database.

use sqlx::PgPool;

use crate::metrics::QueryTimer;

/// Tables the browser may read. Anything else is rejected before a query
/// is built.
pub const BROWSABLE_TABLES: [&str; 12] = [
    "profiles",
    "ad_campaigns",
    "advertisements",
    "credit_requests",
    "tags",
    "user_prompts",
    "automation_rules",
    "feature_flags",
    "feature_access",
    "email_log",
    "email_outbox",
    "verification_tokens",
];

/// Repository backing the admin table browser.
#[derive(Clone)]
pub struct TableBrowserRepository {
    pool: PgPool,
}

impl TableBrowserRepository {
    /// Creates a new TableBrowserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Whether this table may be browsed.
    pub fn is_browsable(table: &str) -> bool {
        BROWSABLE_TABLES.contains(&table)
    }

    /// A page of rows as JSON objects. The table name is interpolated only
    /// after the whitelist check, never from raw caller input.
    pub async fn list_rows(
        &self,
        table: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Option<Vec<serde_json::Value>>, sqlx::Error> {
        if !Self::is_browsable(table) {
            return Ok(None);
        }

        let timer = QueryTimer::new("browse_table_rows");
        let result = sqlx::query_scalar::<_, serde_json::Value>(&format!(
            r#"
            SELECT to_jsonb(t) - 'password_hash' - 'token_hash'
            FROM {table} t
            ORDER BY 1
            LIMIT $1 OFFSET $2
            "#,
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result.map(Some)
    }

    /// Row count for a browsable table.
    pub async fn count_rows(&self, table: &str) -> Result<Option<i64>, sqlx::Error> {
        if !Self::is_browsable(table) {
            return Ok(None);
        }

        let timer = QueryTimer::new("browse_table_count");
        let result = sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.pool)
            .await;
        timer.record();
        result.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitelist_accepts_known_tables() {
        assert!(TableBrowserRepository::is_browsable("profiles"));
        assert!(TableBrowserRepository::is_browsable("email_log"));
    }

    #[test]
    fn test_whitelist_rejects_everything_else() {
        assert!(!TableBrowserRepository::is_browsable("pg_catalog.pg_tables"));
        assert!(!TableBrowserRepository::is_browsable("profiles; DROP TABLE profiles"));
        assert!(!TableBrowserRepository::is_browsable(""));
        assert!(!TableBrowserRepository::is_browsable("PROFILES"));
    }
}
