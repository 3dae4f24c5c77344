//! Sign-up verification policy configuration

use serde::{Deserialize, Serialize};

/// Minimum accepted password length at registration
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Default bcrypt cost used when storing created accounts
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Verification flow configuration
///
/// `code_ttl_seconds` and `max_attempts` are off by default: issued codes
/// stay valid, with unlimited retries, until the session is reset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// Minimum password length accepted at submission
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,

    /// Lifetime of an issued code in seconds
    #[serde(default)]
    pub code_ttl_seconds: Option<i64>,

    /// Number of wrong entries allowed per issued code
    #[serde(default)]
    pub max_attempts: Option<u32>,

    /// bcrypt cost for password hashing in the account registry
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
            code_ttl_seconds: None,
            max_attempts: None,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }
}

impl VerificationConfig {
    /// Enable code expiry
    pub fn with_code_ttl_seconds(mut self, seconds: i64) -> Self {
        self.code_ttl_seconds = Some(seconds);
        self
    }

    /// Enable an attempt limit per issued code
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Whether any hardening beyond the original retry behaviour is active
    pub fn is_hardened(&self) -> bool {
        self.code_ttl_seconds.is_some() || self.max_attempts.is_some()
    }
}

fn default_min_password_length() -> usize {
    DEFAULT_MIN_PASSWORD_LENGTH
}

fn default_bcrypt_cost() -> u32 {
    DEFAULT_BCRYPT_COST
}
