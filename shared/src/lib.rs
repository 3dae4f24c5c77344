//! Shared utilities and common types for the Ocean Hazard sign-up services
//!
//! This crate provides functionality used across all workspace members:
//! - Configuration types (environment, logging, verification policy)
//! - Validation helpers for registration form values
//! - Contact masking for structured logs

pub mod config;
pub mod utils;

pub use config::{AppConfig, Environment, LogFormat, LoggingConfig, VerificationConfig};
pub use utils::{mask, validation};
