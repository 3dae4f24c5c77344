//! Dual-channel sign-up verification
//!
//! This module provides the sign-up verification workflow:
//! - Registration form validation
//! - One 4-digit code per supplied contact channel, delivered out of band
//! - Per-channel verification in any order
//! - Account creation once every required channel is verified

mod config;
mod controller;
mod session;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use config::VerificationFlowConfig;
pub use controller::VerificationFlowController;
pub use session::VerificationSession;
pub use traits::{AccountCreatorTrait, CodeDeliveryTrait, CodeGenerator, RandomCodeGenerator};
pub use types::{FinalizeResult, Panel, RegistrationForm, Stage, ViewDirective};
