//! Domain entities for the sign-up verification flow.

pub mod account;
pub mod channel;
pub mod verification_code;

pub use account::{AccountId, AccountProfile, AccountRole};
pub use channel::{Channel, ChannelSet};
pub use verification_code::{CodeRejection, IssuedCode, CODE_LENGTH, CODE_MAX, CODE_MIN};
