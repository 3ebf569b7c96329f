//! Business logic services.

pub mod feature_resolution;
pub mod invoice;
pub mod media_store;

pub use feature_resolution::{FeatureSet, FlagState};
pub use invoice::{InvoiceData, InvoiceError, InvoiceGenerator};
pub use media_store::{MediaStore, MediaStoreError, MockMediaStore, BUCKETS};
