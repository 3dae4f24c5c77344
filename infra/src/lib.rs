//! # Infrastructure Layer
//!
//! Concrete collaborators for the Ocean Hazard sign-up flow:
//!
//! - **Delivery**: console code delivery standing in for email/SMS gateways
//! - **Accounts**: in-memory account registry with bcrypt password hashing
//! - **Settings**: layered configuration loading (defaults, TOML files, env)
//! - **Telemetry**: `tracing-subscriber` initialisation from `LoggingConfig`

pub use oh_core::errors::*;

/// Code delivery implementations
pub mod delivery;

/// Account creation implementations
pub mod accounts;

/// Configuration loading
pub mod settings;

/// Logging setup
pub mod telemetry;

use thiserror::Error;

/// Infrastructure-level errors
#[derive(Error, Debug)]
pub enum InfrastructureError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing error
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Account registry error
    #[error("Account error: {0}")]
    Account(String),
}

impl From<config::ConfigError> for InfrastructureError {
    fn from(error: config::ConfigError) -> Self {
        InfrastructureError::Config(error.to_string())
    }
}

/// Result type for infrastructure operations
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
