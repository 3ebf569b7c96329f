//! Tag domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A content tag with manual ordering for the pinned/featured rails.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub is_pinned: bool,
    pub is_featured: bool,
    pub order_index: i32,
    pub post_count: i64,
    pub created_at: DateTime<Utc>,
}

/// Request to create a tag. The slug is derived from the name when absent.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: Option<String>,

    #[serde(default)]
    pub is_pinned: bool,

    #[serde(default)]
    pub is_featured: bool,
}

impl CreateTagRequest {
    /// Explicit slug, or one derived from the name.
    pub fn effective_slug(&self) -> String {
        match &self.slug {
            Some(slug) => slug.clone(),
            None => shared::validation::slugify(&self.name),
        }
    }
}

/// Request to update tag fields.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct UpdateTagRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "shared::validation::validate_slug"))]
    pub slug: Option<String>,

    pub is_pinned: Option<bool>,
    pub is_featured: Option<bool>,
}

/// Reorder request: the full visible set in its new order. Every listed tag
/// gets `order_index` set to its position in this vector.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "snake_case")]
pub struct ReorderTagsRequest {
    #[validate(length(min = 1, max = 500, message = "tag_ids must contain 1-500 entries"))]
    pub tag_ids: Vec<Uuid>,
}

impl ReorderTagsRequest {
    /// Rejects duplicate ids, which would make the resulting order ambiguous.
    pub fn has_duplicates(&self) -> bool {
        let unique: std::collections::HashSet<_> = self.tag_ids.iter().collect();
        unique.len() != self.tag_ids.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_slug_derived_from_name() {
        let request = CreateTagRequest {
            name: "Rust Lang".to_string(),
            slug: None,
            is_pinned: false,
            is_featured: false,
        };
        assert_eq!(request.effective_slug(), "rust-lang");
    }

    #[test]
    fn test_effective_slug_explicit_wins() {
        let request = CreateTagRequest {
            name: "Rust Lang".to_string(),
            slug: Some("rustaceans".to_string()),
            is_pinned: false,
            is_featured: false,
        };
        assert_eq!(request.effective_slug(), "rustaceans");
    }

    #[test]
    fn test_reorder_duplicate_detection() {
        let id = Uuid::new_v4();
        let dup = ReorderTagsRequest {
            tag_ids: vec![id, Uuid::new_v4(), id],
        };
        assert!(dup.has_duplicates());

        let ok = ReorderTagsRequest {
            tag_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
        };
        assert!(!ok.has_duplicates());
    }

    #[test]
    fn test_reorder_empty_rejected() {
        let empty = ReorderTagsRequest { tag_ids: vec![] };
        assert!(empty.validate().is_err());
    }
}
