//! HTTP route handlers.

pub mod admin_ads;
pub mod admin_features;
pub mod admin_prompts;
pub mod admin_users;
pub mod advertisements;
pub mod auth;
pub mod campaigns;
pub mod credits;
pub mod email_admin;
pub mod features;
pub mod health;
pub mod media;
pub mod profiles;
pub mod prompts;
pub mod table_browser;
pub mod tags;
