//! Tag entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the tags table. `post_count` is a denormalized
/// counter maintained by content writes.
#[derive(Debug, Clone, FromRow)]
pub struct TagEntity {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub is_pinned: bool,
    pub is_featured: bool,
    pub order_index: i32,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<TagEntity> for domain::models::Tag {
    fn from(entity: TagEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            is_pinned: entity.is_pinned,
            is_featured: entity.is_featured,
            order_index: entity.order_index,
            post_count: entity.post_count,
            created_at: entity.created_at,
        }
    }
}
