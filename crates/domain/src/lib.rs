//! Domain layer for the Mosaic backend.
//!
//! This crate contains:
//! - Domain models (Profile, Campaign, Advertisement, Tag, Prompt, ...)
//! - Business logic services (feature resolution, invoice rendering)
//! - Domain error types

pub mod models;
pub mod services;
