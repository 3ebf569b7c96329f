//! Domain model definitions.

pub mod advertisement;
pub mod automation_rule;
pub mod campaign;
pub mod credit;
pub mod email_log;
pub mod feature_flag;
pub mod profile;
pub mod prompt;
pub mod tag;

pub use advertisement::{
    AdDecisionRequest, Advertisement, ApprovalStatus, CreateAdvertisementRequest,
    UpdateAdvertisementRequest,
};
pub use automation_rule::AutomationRule;
pub use campaign::{
    Campaign, CampaignStatus, CampaignStatusRequest, CreateCampaignRequest, UpdateCampaignRequest,
};
pub use credit::{CreateCreditRequest, CreditRequest, CreditStatus};
pub use email_log::{EmailLog, EmailStats, EmailStatus};
pub use feature_flag::{FeatureAccess, FeatureFlag, GrantAccessRequest, UpsertFlagRequest};
pub use profile::{
    AdminUpdateProfileRequest, BulkDeleteUsersRequest, LoginRequest, Profile, ProfileRole,
    RegisterRequest, TokenResponse, UpdatePasswordRequest, UpdateProfileRequest,
    UsernameAvailability,
};
pub use prompt::{CreatePromptRequest, PromptType, UserPrompt};
pub use tag::{CreateTagRequest, ReorderTagsRequest, Tag, UpdateTagRequest};
