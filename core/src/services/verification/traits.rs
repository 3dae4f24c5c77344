//! Collaborator traits for code delivery, account creation and code generation

use crate::domain::entities::account::{AccountId, AccountProfile};
use crate::domain::entities::channel::Channel;
use crate::domain::entities::verification_code::IssuedCode;

/// Out-of-band delivery of an issued code to the user
pub trait CodeDeliveryTrait {
    /// Deliver `code` for `channel` to `contact`, returning a delivery id
    fn deliver_code(&self, channel: Channel, contact: &str, code: &str) -> Result<String, String>;
}

/// Creates the account once every required channel is verified
pub trait AccountCreatorTrait {
    fn create_account(&self, profile: &AccountProfile) -> Result<AccountId, String>;
}

/// Source of 4-digit verification codes
pub trait CodeGenerator {
    fn generate(&self) -> String;
}

/// Uniform random codes in 1000..=9999
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        IssuedCode::generate_code()
    }
}
