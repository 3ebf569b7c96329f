//! Background jobs.

pub mod email_outbox;
pub mod pool_metrics;
pub mod scheduler;
pub mod token_cleanup;

pub use email_outbox::EmailOutboxJob;
pub use pool_metrics::PoolMetricsJob;
pub use scheduler::{Job, JobFrequency, JobScheduler};
pub use token_cleanup::TokenCleanupJob;
