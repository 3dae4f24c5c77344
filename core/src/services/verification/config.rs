//! Configuration for the verification flow

use oh_shared::config::VerificationConfig;
use oh_shared::config::verification::DEFAULT_MIN_PASSWORD_LENGTH;

/// Policy applied by the verification flow
///
/// The default keeps codes valid with unlimited retries until the session
/// is reset or resubmitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationFlowConfig {
    /// Minimum password length accepted at submission
    pub min_password_length: usize,
    /// Lifetime of an issued code in seconds
    pub code_ttl_seconds: Option<i64>,
    /// Wrong entries allowed per issued code
    pub max_attempts: Option<u32>,
}

impl Default for VerificationFlowConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            code_ttl_seconds: None,
            max_attempts: None,
        }
    }
}

impl From<&VerificationConfig> for VerificationFlowConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            min_password_length: config.min_password_length,
            code_ttl_seconds: config.code_ttl_seconds,
            max_attempts: config.max_attempts,
        }
    }
}
