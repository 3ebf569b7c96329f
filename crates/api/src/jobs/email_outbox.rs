//! Outbox delivery job.
//!
//! Drains due messages from the email_outbox table in batches. The
//! scheduler runs one instance of this job per process, and that single
//! drainer is what keeps a message from being sent twice; SKIP LOCKED
//! only stops overlapping pollers from reading the same rows mid-query.
//! Failures push the message back with exponential backoff until the
//! attempt cap abandons it.

use persistence::repositories::EmailOutboxRepository;
use sqlx::PgPool;

use crate::config::OutboxConfig;
use crate::jobs::scheduler::{Job, JobFrequency};
use crate::services::EmailService;

pub struct EmailOutboxJob {
    pool: PgPool,
    email: EmailService,
    config: OutboxConfig,
}

impl EmailOutboxJob {
    pub fn new(pool: PgPool, email: EmailService, config: OutboxConfig) -> Self {
        Self {
            pool,
            email,
            config,
        }
    }
}

#[async_trait::async_trait]
impl Job for EmailOutboxJob {
    fn name(&self) -> &'static str {
        "email_outbox"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Seconds(self.config.poll_interval_secs)
    }

    async fn execute(&self) -> Result<(), String> {
        if !self.email.is_enabled() {
            return Ok(());
        }

        let outbox = EmailOutboxRepository::new(self.pool.clone());

        if let Ok(pending) = outbox.count_pending(self.config.max_attempts).await {
            metrics::gauge!("email_outbox_pending").set(pending as f64);
        }

        let batch = outbox
            .fetch_due(self.config.batch_size, self.config.max_attempts)
            .await
            .map_err(|e| format!("Failed to fetch outbox batch: {}", e))?;

        if batch.is_empty() {
            return Ok(());
        }

        let total = batch.len();
        let mut delivered = 0usize;

        for message in batch {
            let result = self
                .email
                .send(
                    &message.recipient,
                    &message.subject,
                    &message.body,
                    &message.template_type,
                    message.triggered_by,
                )
                .await;

            match result {
                Ok(()) => {
                    outbox
                        .mark_sent(message.id)
                        .await
                        .map_err(|e| format!("Failed to mark message sent: {}", e))?;
                    delivered += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        message_id = %message.id,
                        recipient = %message.recipient,
                        attempts = message.attempts,
                        error = %e,
                        "Outbox delivery failed"
                    );
                    outbox
                        .mark_failed(message.id, &e.to_string())
                        .await
                        .map_err(|e| format!("Failed to record delivery failure: {}", e))?;
                }
            }
        }

        tracing::info!(delivered, total, "Outbox batch processed");
        Ok(())
    }
}
