//! Error types for the sign-up verification flow.
//!
//! User-facing variants render the exact message shown under the form.
//! `ContractViolation` marks calls the view should never be able to make
//! and carries no user message.

use thiserror::Error;

use crate::domain::entities::channel::Channel;


/// Registration form validation failures, checked in declaration order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("Please select a role.")]
    RoleNotSelected,

    #[error("Please provide an email or phone number.")]
    NoContactChannel,

    #[error("Password must be at least {min_length} characters long.")]
    PasswordTooShort { min_length: usize },

    #[error("Please confirm you are not a robot.")]
    RobotCheckMissing,
}

/// Errors raised by verification flow transitions
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlowError {
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error("Incorrect {} OTP.", .channel.label())]
    CodeMismatch { channel: Channel },

    #[error("{} verification code expired. Go back and submit again.", .channel.label())]
    CodeExpired { channel: Channel },

    #[error("Too many incorrect {} OTP attempts. Go back and submit again.", .channel.label())]
    AttemptsExhausted { channel: Channel },

    #[error("Could not deliver the verification code. Please try again.")]
    Delivery { channel: Channel, reason: String },

    #[error("Account creation failed. Please try again.")]
    AccountCreation { reason: String },

    #[error("Contract violation in {operation}: {reason}")]
    ContractViolation { operation: &'static str, reason: String },
}

impl FlowError {
    pub(crate) fn contract(operation: &'static str, reason: impl Into<String>) -> Self {
        FlowError::ContractViolation {
            operation,
            reason: reason.into(),
        }
    }

    /// Message to show the user, `None` for contract violations
    pub fn user_message(&self) -> Option<String> {
        match self {
            FlowError::ContractViolation { .. } => None,
            other => Some(other.to_string()),
        }
    }

    /// Stable machine-readable code
    pub fn error_code(&self) -> &'static str {
        match self {
            FlowError::Registration(RegistrationError::RoleNotSelected) => "ROLE_NOT_SELECTED",
            FlowError::Registration(RegistrationError::NoContactChannel) => "NO_CONTACT_CHANNEL",
            FlowError::Registration(RegistrationError::PasswordTooShort { .. }) => "PASSWORD_TOO_SHORT",
            FlowError::Registration(RegistrationError::RobotCheckMissing) => "ROBOT_CHECK_MISSING",
            FlowError::CodeMismatch { .. } => "CODE_MISMATCH",
            FlowError::CodeExpired { .. } => "CODE_EXPIRED",
            FlowError::AttemptsExhausted { .. } => "ATTEMPTS_EXHAUSTED",
            FlowError::Delivery { .. } => "DELIVERY_FAILED",
            FlowError::AccountCreation { .. } => "ACCOUNT_CREATION_FAILED",
            FlowError::ContractViolation { .. } => "CONTRACT_VIOLATION",
        }
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
