//! Orphaned media detection.
//!
//! Compares the objects present in each storage bucket against the URLs
//! referenced from the database. Objects nothing points at are reported
//! and can be removed one at a time from the admin panel.

use std::collections::HashSet;
use std::sync::Arc;

use domain::services::{MediaStore, MediaStoreError, BUCKETS};
use persistence::repositories::{AdvertisementRepository, ProfileRepository};
use serde::Serialize;
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrphanScanError {
    #[error("Storage error: {0}")]
    Store(#[from] MediaStoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Object is still referenced: {bucket}/{key}")]
    StillReferenced { bucket: String, key: String },
}

/// Orphaned objects found in one bucket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct OrphanReport {
    pub bucket: String,
    pub orphans: Vec<String>,
    pub total_objects: usize,
}

#[derive(Clone)]
pub struct OrphanScanner {
    pool: PgPool,
    store: Arc<dyn MediaStore>,
}

impl OrphanScanner {
    pub fn new(pool: PgPool, store: Arc<dyn MediaStore>) -> Self {
        Self { pool, store }
    }

    /// Scans every known bucket and reports unreferenced objects.
    pub async fn scan(&self) -> Result<Vec<OrphanReport>, OrphanScanError> {
        let mut reports = Vec::with_capacity(BUCKETS.len());

        for bucket in BUCKETS {
            let objects = self.store.list(bucket).await?;
            let referenced = self.referenced_keys(bucket).await?;

            let mut orphans: Vec<String> = objects
                .iter()
                .filter(|key| !referenced.contains(key.as_str()))
                .cloned()
                .collect();
            orphans.sort();

            reports.push(OrphanReport {
                bucket: bucket.to_string(),
                orphans,
                total_objects: objects.len(),
            });
        }

        Ok(reports)
    }

    /// Removes a single object after re-checking it is still unreferenced.
    /// The re-check closes the window where an object was referenced after
    /// the scan that reported it.
    pub async fn remove(&self, bucket: &str, key: &str) -> Result<(), OrphanScanError> {
        let referenced = self.referenced_keys(bucket).await?;
        if referenced.contains(key) {
            return Err(OrphanScanError::StillReferenced {
                bucket: bucket.to_string(),
                key: key.to_string(),
            });
        }

        self.store.remove(bucket, key).await?;
        tracing::info!(bucket, key, "Removed orphaned object");
        Ok(())
    }

    async fn referenced_keys(&self, bucket: &str) -> Result<HashSet<String>, OrphanScanError> {
        let urls = match bucket {
            "avatars" => {
                ProfileRepository::new(self.pool.clone())
                    .list_avatar_urls()
                    .await?
            }
            "ad-images" => {
                AdvertisementRepository::new(self.pool.clone())
                    .list_image_urls()
                    .await?
            }
            other => return Err(MediaStoreError::UnknownBucket(other.to_string()).into()),
        };

        Ok(urls.iter().filter_map(|url| object_key(url)).collect())
    }
}

/// Extracts the object key from a stored URL. Keys are the final path
/// segment; bare keys pass through unchanged.
fn object_key(url: &str) -> Option<String> {
    let key = url.rsplit('/').next()?;
    if key.is_empty() {
        None
    } else {
        Some(key.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::services::MockMediaStore;

    #[test]
    fn test_object_key_extraction() {
        assert_eq!(
            object_key("https://cdn.mosaic.app/avatars/abc.png"),
            Some("abc.png".to_string())
        );
        assert_eq!(object_key("abc.png"), Some("abc.png".to_string()));
        assert_eq!(object_key("https://cdn.mosaic.app/avatars/"), None);
    }

    #[tokio::test]
    async fn test_mock_store_lists_buckets() {
        let store = MockMediaStore::new();
        store.put("avatars", "a.png");
        store.put("avatars", "b.png");

        let listed = store.list("avatars").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(store.list("ad-images").await.unwrap().is_empty());
    }
}
