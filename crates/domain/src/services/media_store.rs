//! Object storage abstraction for uploaded media.
//!
//! The platform keeps user uploads in two buckets; the orphan scanner and
//! cleanup routes only need listing and deletion, so the trait stays small.

use async_trait::async_trait;
use thiserror::Error;

/// Buckets the platform owns. Avatars for profile pictures, ad-images for
/// advertisement creatives.
pub const BUCKETS: [&str; 2] = ["avatars", "ad-images"];

#[derive(Debug, Error)]
pub enum MediaStoreError {
    #[error("Unknown bucket: {0}")]
    UnknownBucket(String),

    #[error("Object not found: {bucket}/{key}")]
    NotFound { bucket: String, key: String },

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Minimal view of an object store.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Lists every object key in a bucket.
    async fn list(&self, bucket: &str) -> Result<Vec<String>, MediaStoreError>;

    /// Removes one object. Removing a missing object is an error.
    async fn remove(&self, bucket: &str, key: &str) -> Result<(), MediaStoreError>;
}

/// In-memory store for tests and local development.
#[derive(Debug, Default)]
pub struct MockMediaStore {
    objects: std::sync::Mutex<std::collections::HashMap<String, Vec<String>>>,
}

impl MockMediaStore {
    pub fn new() -> Self {
        let mut objects = std::collections::HashMap::new();
        for bucket in BUCKETS {
            objects.insert(bucket.to_string(), Vec::new());
        }
        Self {
            objects: std::sync::Mutex::new(objects),
        }
    }

    pub fn put(&self, bucket: &str, key: &str) {
        let mut objects = self.objects.lock().unwrap();
        objects
            .entry(bucket.to_string())
            .or_default()
            .push(key.to_string());
    }
}

#[async_trait]
impl MediaStore for MockMediaStore {
    async fn list(&self, bucket: &str) -> Result<Vec<String>, MediaStoreError> {
        let objects = self.objects.lock().unwrap();
        objects
            .get(bucket)
            .cloned()
            .ok_or_else(|| MediaStoreError::UnknownBucket(bucket.to_string()))
    }

    async fn remove(&self, bucket: &str, key: &str) -> Result<(), MediaStoreError> {
        let mut objects = self.objects.lock().unwrap();
        let keys = objects
            .get_mut(bucket)
            .ok_or_else(|| MediaStoreError::UnknownBucket(bucket.to_string()))?;
        let before = keys.len();
        keys.retain(|k| k != key);
        if keys.len() == before {
            return Err(MediaStoreError::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_list_and_remove() {
        let store = MockMediaStore::new();
        store.put("avatars", "a.png");
        store.put("avatars", "b.png");

        let keys = store.list("avatars").await.unwrap();
        assert_eq!(keys, vec!["a.png".to_string(), "b.png".to_string()]);

        store.remove("avatars", "a.png").await.unwrap();
        let keys = store.list("avatars").await.unwrap();
        assert_eq!(keys, vec!["b.png".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_unknown_bucket() {
        let store = MockMediaStore::new();
        let err = store.list("nope").await.unwrap_err();
        assert!(matches!(err, MediaStoreError::UnknownBucket(_)));
    }

    #[tokio::test]
    async fn test_mock_remove_missing_key() {
        let store = MockMediaStore::new();
        let err = store.remove("avatars", "ghost.png").await.unwrap_err();
        assert!(matches!(err, MediaStoreError::NotFound { .. }));
    }
}
