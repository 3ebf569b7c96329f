//! Entity definitions (database row mappings).

mod advertisement;
mod campaign;
mod credit;
mod email;
mod feature_flag;
mod profile;
mod prompt;
mod tag;
mod token;

pub use advertisement::AdvertisementEntity;
pub use campaign::CampaignEntity;
pub use credit::CreditRequestEntity;
pub use email::{EmailLogEntity, EmailOutboxEntity};
pub use feature_flag::{FeatureAccessEntity, FeatureFlagEntity};
pub use profile::ProfileEntity;
pub use prompt::{AutomationRuleEntity, UserPromptEntity};
pub use tag::TagEntity;
pub use token::VerificationTokenEntity;
