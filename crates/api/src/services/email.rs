//! Transactional email delivery.
//!
//! Two providers exist: `relay` posts the message to an HTTP mail relay,
//! `console` writes it to the log for development. Every delivery attempt,
//! successful or not, is recorded in the `email_log` audit table before the
//! outcome is returned to the caller.

use domain::models::EmailStatus;
use persistence::repositories::{EmailLogRepository, EmailOutboxRepository};
use serde_json::json;
use sqlx::PgPool;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::config::EmailConfig;
use crate::middleware::metrics::record_email_delivery;

#[derive(Debug, Error)]
pub enum EmailError {
    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Unknown email provider: {0}")]
    UnknownProvider(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Sends transactional email and keeps the audit trail.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
    pool: PgPool,
    client: reqwest::Client,
}

impl EmailService {
    pub fn new(config: EmailConfig, pool: PgPool) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.relay_timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            config,
            pool,
            client,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Base URL for links embedded in email bodies.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Delivers a message immediately and records the outcome in the audit
    /// log. The audit row is written for both outcomes; its own failure is
    /// only logged. The caller always gets the delivery outcome.
    pub async fn send(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        template_type: &str,
        triggered_by: Option<Uuid>,
    ) -> Result<(), EmailError> {
        if !self.config.enabled {
            tracing::debug!(recipient, subject, "Email disabled, skipping send");
            return Ok(());
        }

        let outcome = self.deliver(recipient, subject, body).await;

        let (status, error_text) = match &outcome {
            Ok(()) => (EmailStatus::Sent, None),
            Err(e) => (EmailStatus::Failed, Some(e.to_string())),
        };

        if let Err(e) = EmailLogRepository::new(self.pool.clone())
            .insert(
                recipient,
                subject,
                status,
                template_type,
                triggered_by,
                error_text.as_deref(),
            )
            .await
        {
            tracing::error!(recipient, subject, error = %e, "Failed to write email audit row");
        }

        match status {
            EmailStatus::Sent => record_email_delivery("sent"),
            EmailStatus::Failed => record_email_delivery("failed"),
        }

        outcome
    }

    /// Queues a message for asynchronous delivery by the outbox job.
    pub async fn enqueue(
        &self,
        recipient: &str,
        subject: &str,
        body: &str,
        template_type: &str,
        triggered_by: Option<Uuid>,
    ) -> Result<(), EmailError> {
        EmailOutboxRepository::new(self.pool.clone())
            .enqueue(recipient, subject, body, template_type, triggered_by)
            .await?;
        tracing::debug!(recipient, subject, "Email queued");
        Ok(())
    }

    async fn deliver(&self, recipient: &str, subject: &str, body: &str) -> Result<(), EmailError> {
        match self.config.provider.as_str() {
            "relay" => {
                let payload = json!({
                    "recipientEmail": recipient,
                    "subject": subject,
                    "htmlContent": body,
                });

                let response = self
                    .client
                    .post(&self.config.relay_url)
                    .json(&payload)
                    .send()
                    .await
                    .map_err(|e| EmailError::Relay(e.to_string()))?;

                if !response.status().is_success() {
                    return Err(EmailError::Relay(format!(
                        "relay returned {}",
                        response.status()
                    )));
                }

                Ok(())
            }
            "console" => {
                tracing::info!(recipient, subject, body, "Email (console provider)");
                Ok(())
            }
            other => Err(EmailError::UnknownProvider(other.to_string())),
        }
    }
}

/// Builds the address verification email.
pub fn verification_email(base_url: &str, username: &str, token: &str) -> (String, String) {
    let subject = "Verify your email address".to_string();
    let body = format!(
        "Hi {username},\n\n\
         Please confirm your email address by opening the link below:\n\n\
         {base_url}/verify?token={token}\n\n\
         The link expires in 24 hours. If you did not create an account,\n\
         you can ignore this message.",
    );
    (subject, body)
}

/// Builds the body for an automation prompt email.
pub fn prompt_email(message: &str, action_url: Option<&str>) -> String {
    match action_url {
        Some(url) => format!("{message}\n\n{url}"),
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmailConfig;
    use sqlx::postgres::PgPoolOptions;

    fn unreachable_pool() -> PgPool {
        PgPoolOptions::new()
            .acquire_timeout(Duration::from_millis(50))
            .connect_lazy("postgres://127.0.0.1:1/mosaic_test")
            .expect("lazy pool")
    }

    fn service(provider: &str, relay_url: &str) -> EmailService {
        EmailService::new(
            EmailConfig {
                enabled: true,
                provider: provider.to_string(),
                relay_url: relay_url.to_string(),
                relay_timeout_secs: 1,
                base_url: "https://mosaic.app".to_string(),
            },
            unreachable_pool(),
        )
    }

    #[tokio::test]
    async fn test_send_survives_audit_write_failure() {
        // Console delivery succeeds; only the audit insert can fail here.
        let svc = service("console", "");
        let result = svc
            .send("ada@example.com", "Hello", "Body", "test", None)
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_failed_delivery_is_returned_to_caller() {
        let svc = service("relay", "not a url");
        let err = svc
            .send("ada@example.com", "Hello", "Body", "test", None)
            .await
            .unwrap_err();
        assert!(matches!(err, EmailError::Relay(_)));
    }

    #[tokio::test]
    async fn test_unknown_provider_is_an_error() {
        let svc = service("carrier-pigeon", "");
        let err = svc
            .send("ada@example.com", "Hello", "Body", "test", None)
            .await
            .unwrap_err();
        assert!(matches!(err, EmailError::UnknownProvider(_)));
    }

    #[test]
    fn test_verification_email_contains_token_link() {
        let (subject, body) = verification_email("https://mosaic.app", "ada", "tok123");
        assert_eq!(subject, "Verify your email address");
        assert!(body.contains("Hi ada"));
        assert!(body.contains("https://mosaic.app/verify?token=tok123"));
    }

    #[test]
    fn test_prompt_email_appends_action_url() {
        let body = prompt_email("Finish your profile.", Some("https://mosaic.app/settings"));
        assert!(body.ends_with("https://mosaic.app/settings"));

        let plain = prompt_email("Finish your profile.", None);
        assert_eq!(plain, "Finish your profile.");
    }
}
