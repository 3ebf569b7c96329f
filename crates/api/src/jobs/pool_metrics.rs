//! Connection pool gauge job.

use persistence::metrics::record_pool_metrics;
use sqlx::PgPool;

use crate::jobs::scheduler::{Job, JobFrequency};

/// Publishes connection pool gauges once a minute.
pub struct PoolMetricsJob {
    pool: PgPool,
}

impl PoolMetricsJob {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl Job for PoolMetricsJob {
    fn name(&self) -> &'static str {
        "pool_metrics"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Minutes(1)
    }

    async fn execute(&self) -> Result<(), String> {
        record_pool_metrics(&self.pool);
        Ok(())
    }
}
