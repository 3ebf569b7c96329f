//! Tag repository for database operations.

use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::TagEntity;
use crate::metrics::QueryTimer;

const TAG_COLUMNS: &str =
    "id, name, slug, is_pinned, is_featured, order_index, post_count, created_at";

/// Repository for tag database operations.
#[derive(Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Creates a new TagRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a tag. New tags sort after existing ones.
    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        is_pinned: bool,
        is_featured: bool,
    ) -> Result<TagEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_tag");
        let result = sqlx::query_as::<_, TagEntity>(&format!(
            r#"
            INSERT INTO tags (name, slug, is_pinned, is_featured, order_index)
            VALUES ($1, $2, $3, $4,
                    (SELECT COALESCE(MAX(order_index), -1) + 1 FROM tags))
            RETURNING {TAG_COLUMNS}
            "#,
        ))
        .bind(name)
        .bind(slug)
        .bind(is_pinned)
        .bind(is_featured)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find tag by slug.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_tag_by_slug");
        let result = sqlx::query_as::<_, TagEntity>(&format!(
            "SELECT {TAG_COLUMNS} FROM tags WHERE slug = $1",
        ))
        .bind(slug)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Full tag list in display order: pinned first, then by the manual
    /// order, name as tiebreaker.
    pub async fn list(&self) -> Result<Vec<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_tags");
        let result = sqlx::query_as::<_, TagEntity>(&format!(
            r#"
            SELECT {TAG_COLUMNS}
            FROM tags
            ORDER BY is_pinned DESC, order_index ASC, name ASC
            "#,
        ))
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Update tag fields, keeping current values for absent ones.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        slug: Option<&str>,
        is_pinned: Option<bool>,
        is_featured: Option<bool>,
    ) -> Result<Option<TagEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_tag");
        let result = sqlx::query_as::<_, TagEntity>(&format!(
            r#"
            UPDATE tags
            SET name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                is_pinned = COALESCE($4, is_pinned),
                is_featured = COALESCE($5, is_featured)
            WHERE id = $1
            RETURNING {TAG_COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(name)
        .bind(slug)
        .bind(is_pinned)
        .bind(is_featured)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Delete a tag.
    pub async fn delete(&self, id: Uuid) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("delete_tag");
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        timer.record();
        Ok(result.rows_affected())
    }

    /// Rewrite order_index for the listed tags in one transaction: each tag
    /// gets its position in the slice. Unlisted tags are untouched.
    pub async fn reorder(&self, tag_ids: &[Uuid]) -> Result<u64, sqlx::Error> {
        let timer = QueryTimer::new("reorder_tags");
        let mut tx = self.pool.begin().await?;

        let mut updated = 0u64;
        for (position, tag_id) in tag_ids.iter().enumerate() {
            let result = sqlx::query("UPDATE tags SET order_index = $2 WHERE id = $1")
                .bind(tag_id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
            updated += result.rows_affected();
        }

        tx.commit().await?;
        timer.record();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    // Note: TagRepository tests require a database connection and are
    // covered by integration tests
}
