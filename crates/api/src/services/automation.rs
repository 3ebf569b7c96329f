//! Prompt automation.
//!
//! Trigger events (signup, profile edits, manual admin triggers) are
//! matched against admin-configured rules. A matching rule creates an
//! in-app prompt and optionally queues an email. Two guards keep prompts
//! from stacking up: an in-process debounce that swallows rapid repeat
//! triggers for the same user, and a database check that skips creation
//! while an identical undismissed prompt exists.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use domain::models::automation_rule::{COMPLETE_PROFILE_TITLE, TRIGGER_INCOMPLETE_PROFILE};
use persistence::repositories::{AutomationRuleRepository, ProfileRepository, PromptRepository};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::AutomationConfig;
use crate::middleware::metrics::record_automation_trigger;
use crate::services::email::{prompt_email, EmailService};

/// Outcome of a trigger evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    /// A prompt was created.
    Fired,
    /// Swallowed by the in-process debounce window.
    Debounced,
    /// No active rule for this trigger type.
    NoRule,
    /// An identical undismissed prompt already exists.
    Duplicate,
    /// Completeness trigger on an already complete profile; any lingering
    /// completeness prompts were dismissed instead.
    ProfileComplete,
}

#[derive(Clone)]
pub struct AutomationService {
    pool: PgPool,
    email: EmailService,
    debounce: Duration,
    recent: Arc<Mutex<HashMap<(Uuid, String), Instant>>>,
}

impl AutomationService {
    pub fn new(pool: PgPool, email: EmailService, config: &AutomationConfig) -> Self {
        Self {
            pool,
            email,
            debounce: Duration::from_secs(config.debounce_secs),
            recent: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Evaluates a trigger for a user.
    ///
    /// `recipient_override` replaces the profile email for the optional
    /// rule email; used by the admin manual trigger.
    pub async fn handle_trigger(
        &self,
        user_id: Uuid,
        trigger_type: &str,
        recipient_override: Option<&str>,
    ) -> Result<TriggerOutcome, sqlx::Error> {
        if self.is_debounced(user_id, trigger_type) {
            tracing::debug!(%user_id, trigger_type, "Trigger debounced");
            return Ok(TriggerOutcome::Debounced);
        }

        let profiles = ProfileRepository::new(self.pool.clone());
        let prompts = PromptRepository::new(self.pool.clone());

        let Some(profile) = profiles.find_by_id(user_id).await? else {
            return Ok(TriggerOutcome::NoRule);
        };
        let profile: domain::models::Profile = profile.into();

        // Completeness is special: the trigger fires on every profile
        // edit, and a complete profile clears the nag rather than
        // creating one.
        if trigger_type == TRIGGER_INCOMPLETE_PROFILE && profile.is_complete() {
            let dismissed = prompts
                .dismiss_completion_prompts(user_id, COMPLETE_PROFILE_TITLE)
                .await?;
            if dismissed > 0 {
                tracing::info!(%user_id, dismissed, "Profile complete, dismissed nags");
            }
            return Ok(TriggerOutcome::ProfileComplete);
        }

        let rules = AutomationRuleRepository::new(self.pool.clone());
        let Some(rule) = rules.find_active_by_trigger(trigger_type).await? else {
            return Ok(TriggerOutcome::NoRule);
        };

        if prompts.has_active_with_title(user_id, &rule.title).await? {
            tracing::debug!(%user_id, trigger_type, "Duplicate prompt suppressed");
            return Ok(TriggerOutcome::Duplicate);
        }

        prompts
            .create(
                user_id,
                &rule.title,
                &rule.message,
                rule.prompt_type,
                rule.action_url.as_deref(),
                None,
            )
            .await?;

        if rule.send_email {
            let recipient = recipient_override.unwrap_or(&profile.email);
            let subject = rule.email_subject.as_deref().unwrap_or(&rule.title);
            let body = prompt_email(&rule.message, rule.action_url.as_deref());

            if let Err(e) = self
                .email
                .enqueue(recipient, subject, &body, "automation", None)
                .await
            {
                tracing::error!(%user_id, trigger_type, error = %e, "Failed to queue rule email");
            }
        }

        record_automation_trigger(trigger_type);
        tracing::info!(%user_id, trigger_type, "Automation prompt created");
        Ok(TriggerOutcome::Fired)
    }

    /// Records the trigger and reports whether it fell inside the debounce
    /// window of a previous one.
    fn is_debounced(&self, user_id: Uuid, trigger_type: &str) -> bool {
        let key = (user_id, trigger_type.to_string());
        let now = Instant::now();
        let mut recent = self.recent.lock().expect("debounce map poisoned");

        if let Some(last) = recent.get(&key) {
            if now.duration_since(*last) < self.debounce {
                return true;
            }
        }

        recent.insert(key, now);

        // Keep the map from growing without bound.
        if recent.len() > 10_000 {
            recent.retain(|_, last| now.duration_since(*last) < self.debounce);
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EmailConfig;
    use sqlx::postgres::PgPoolOptions;

    // No database is reached here; is_debounced is purely in-process.
    fn service(window_secs: u64) -> AutomationService {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://127.0.0.1:1/mosaic_test")
            .expect("lazy pool");
        let email = EmailService::new(EmailConfig::default(), pool.clone());
        AutomationService::new(
            pool,
            email,
            &AutomationConfig {
                debounce_secs: window_secs,
            },
        )
    }

    #[tokio::test]
    async fn test_repeat_trigger_is_debounced() {
        let svc = service(5);
        let user = Uuid::new_v4();

        assert!(!svc.is_debounced(user, "signup"));
        assert!(svc.is_debounced(user, "signup"));
    }

    #[tokio::test]
    async fn test_debounce_is_per_user_and_trigger() {
        let svc = service(5);
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        assert!(!svc.is_debounced(alice, "signup"));
        assert!(!svc.is_debounced(bob, "signup"));
        assert!(!svc.is_debounced(alice, "incomplete_profile"));
        assert!(svc.is_debounced(alice, "signup"));
    }

    #[tokio::test]
    async fn test_zero_window_never_debounces() {
        let svc = service(0);
        let user = Uuid::new_v4();

        assert!(!svc.is_debounced(user, "signup"));
        assert!(!svc.is_debounced(user, "signup"));
    }
}
