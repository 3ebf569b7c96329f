//! Repository implementations.

mod advertisement;
mod automation_rule;
mod campaign;
mod credit;
mod email_log;
mod email_outbox;
mod feature_flag;
mod profile;
mod prompt;
mod table_browser;
mod tag;
mod verification_token;

pub use advertisement::AdvertisementRepository;
pub use automation_rule::AutomationRuleRepository;
pub use campaign::CampaignRepository;
pub use credit::CreditRepository;
pub use email_log::EmailLogRepository;
pub use email_outbox::EmailOutboxRepository;
pub use feature_flag::FeatureFlagRepository;
pub use profile::ProfileRepository;
pub use prompt::PromptRepository;
pub use table_browser::{TableBrowserRepository, BROWSABLE_TABLES};
pub use tag::TagRepository;
pub use verification_token::VerificationTokenRepository;
