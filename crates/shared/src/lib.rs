//! Shared utilities and common types for the Mosaic backend.
//!
//! This crate provides common functionality used across all other crates:
//! - JWT token generation and validation
//! - Password hashing with Argon2id
//! - Opaque token generation and hashing (email verification, password reset)
//! - Money formatting for integer-cent amounts
//! - Offset pagination helpers
//! - Common validation logic

pub mod jwt;
pub mod money;
pub mod pagination;
pub mod password;
pub mod token;
pub mod validation;
