//! Business services containing the sign-up use cases.

pub mod verification;

pub use verification::{
    AccountCreatorTrait, CodeDeliveryTrait, CodeGenerator, FinalizeResult, Panel,
    RandomCodeGenerator, RegistrationForm, Stage, VerificationFlowConfig,
    VerificationFlowController, VerificationSession, ViewDirective,
};
