//! Mosaic backend API library.
//!
//! Exposes the application modules for the binary and for integration tests.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod jobs;
pub mod middleware;
pub mod routes;
pub mod services;

#[cfg(test)]
pub mod test_support;
