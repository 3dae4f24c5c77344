//! Configuration module
//!
//! - `environment` - Environment detection and logging configuration
//! - `verification` - Sign-up verification policy

pub mod environment;
pub mod verification;

use serde::{Deserialize, Serialize};

pub use environment::{Environment, LogFormat, LoggingConfig};
pub use verification::VerificationConfig;

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "RawAppConfig")]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Verification flow configuration
    pub verification: VerificationConfig,
}

/// Deserialization shape; a missing logging section follows the environment
#[derive(Deserialize)]
struct RawAppConfig {
    #[serde(default)]
    environment: Environment,
    logging: Option<LoggingConfig>,
    #[serde(default)]
    verification: VerificationConfig,
}

impl From<RawAppConfig> for AppConfig {
    fn from(raw: RawAppConfig) -> Self {
        Self {
            environment: raw.environment,
            logging: raw
                .logging
                .unwrap_or_else(|| LoggingConfig::for_environment(raw.environment)),
            verification: raw.verification,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl AppConfig {
    /// Defaults for the given environment
    pub fn for_environment(environment: Environment) -> Self {
        Self {
            environment,
            logging: LoggingConfig::for_environment(environment),
            verification: VerificationConfig::default(),
        }
    }
}
