//! One-time code issued to a single contact channel during sign-up.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::channel::Channel;

/// Length of the verification code
pub const CODE_LENGTH: usize = 4;

/// Smallest code that can be issued
pub const CODE_MIN: u32 = 1000;

/// Largest code that can be issued
pub const CODE_MAX: u32 = 9999;

/// Why an entered code was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRejection {
    /// The code's lifetime has elapsed
    Expired,
    /// The attempt budget was already spent before this entry
    AttemptsExhausted,
    /// Wrong code; `remaining` is set when an attempt limit is configured
    Mismatch { remaining: Option<u32> },
}

/// Verification code issued for one required channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCode {
    /// Unique identifier of this issuance
    pub id: Uuid,

    /// Channel the code was delivered through
    pub channel: Channel,

    /// The 4-digit code
    pub code: String,

    /// Number of entries checked against this code
    pub attempts: u32,

    /// When the code was issued
    pub issued_at: DateTime<Utc>,

    /// When the code stops being accepted; `None` means never
    pub expires_at: Option<DateTime<Utc>>,
}

impl IssuedCode {
    /// Wraps a generated code, optionally with a lifetime in seconds
    pub fn new(channel: Channel, code: String, ttl_seconds: Option<i64>) -> Self {
        let issued_at = Utc::now();
        Self {
            id: Uuid::new_v4(),
            channel,
            code,
            attempts: 0,
            issued_at,
            expires_at: ttl_seconds.map(|ttl| issued_at + Duration::seconds(ttl)),
        }
    }

    /// Generates a random code in the inclusive range 1000..=9999
    pub fn generate_code() -> String {
        let mut rng = rand::thread_rng();
        rng.gen_range(CODE_MIN..=CODE_MAX).to_string()
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|expires_at| now > expires_at).unwrap_or(false)
    }

    /// Constant-time comparison against an entered value
    pub fn matches(&self, entered: &str) -> bool {
        self.code.len() == entered.len() && constant_time_eq(self.code.as_bytes(), entered.as_bytes())
    }

    /// Checks an entered code, counting the attempt
    ///
    /// Expiry and an exhausted budget are reported before the comparison so
    /// a correct code cannot be accepted once either limit is hit.
    pub fn check(
        &mut self,
        entered: &str,
        max_attempts: Option<u32>,
        now: DateTime<Utc>,
    ) -> Result<(), CodeRejection> {
        if self.is_expired_at(now) {
            return Err(CodeRejection::Expired);
        }

        if let Some(max) = max_attempts {
            if self.attempts >= max {
                return Err(CodeRejection::AttemptsExhausted);
            }
        }

        self.attempts += 1;

        if self.matches(entered) {
            Ok(())
        } else {
            Err(CodeRejection::Mismatch {
                remaining: max_attempts.map(|max| max.saturating_sub(self.attempts)),
            })
        }
    }
}
