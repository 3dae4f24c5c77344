//! Sign-up flow controller wiring the session to its collaborators

use chrono::Utc;
use std::sync::Arc;

use oh_shared::utils::mask::{mask_email, mask_phone_number};

use crate::domain::entities::account::AccountRole;
use crate::domain::entities::channel::Channel;
use crate::domain::entities::verification_code::IssuedCode;
use crate::errors::{FlowError, FlowResult};

use super::config::VerificationFlowConfig;
use super::session::VerificationSession;
use super::traits::{AccountCreatorTrait, CodeDeliveryTrait, CodeGenerator, RandomCodeGenerator};
use super::types::{FinalizeResult, Panel, RegistrationForm, ViewDirective};

fn masked(channel: Channel, contact: &str) -> String {
    match channel {
        Channel::Email => mask_email(contact),
        Channel::Phone => mask_phone_number(contact),
    }
}

/// Drives one sign-up session from role selection to account creation
///
/// Each method maps to one view trigger and returns the directives the
/// view should apply. User-facing failures are returned as `FlowError`
/// and also recorded as the session's current error message.
pub struct VerificationFlowController<D: CodeDeliveryTrait, A: AccountCreatorTrait> {
    session: VerificationSession,
    delivery: Arc<D>,
    accounts: Arc<A>,
    generator: Box<dyn CodeGenerator>,
    config: VerificationFlowConfig,
}

impl<D: CodeDeliveryTrait, A: AccountCreatorTrait> VerificationFlowController<D, A> {
    /// Create a controller with random code generation
    ///
    /// # Arguments
    ///
    /// * `delivery` - Out-of-band code delivery
    /// * `accounts` - Account creation collaborator
    /// * `config` - Flow policy
    pub fn new(delivery: Arc<D>, accounts: Arc<A>, config: VerificationFlowConfig) -> Self {
        Self {
            session: VerificationSession::new(),
            delivery,
            accounts,
            generator: Box::new(RandomCodeGenerator),
            config,
        }
    }

    /// Replace the code generator
    pub fn with_code_generator(mut self, generator: impl CodeGenerator + 'static) -> Self {
        self.generator = Box::new(generator);
        self
    }

    pub fn session(&self) -> &VerificationSession {
        &self.session
    }

    pub fn config(&self) -> &VerificationFlowConfig {
        &self.config
    }

    pub fn show_sign_up(&mut self) -> Vec<ViewDirective> {
        self.session.show_panel(Panel::SignUp)
    }

    pub fn show_sign_in(&mut self) -> Vec<ViewDirective> {
        self.session.show_panel(Panel::SignIn)
    }

    pub fn select_role(&mut self, role: AccountRole) -> Vec<ViewDirective> {
        tracing::debug!(role = %role, event = "role_selected", "Sign-up role selected");
        self.session.select_role(role)
    }

    /// Validate the details form, issue and deliver one code per supplied channel
    ///
    /// Codes are delivered before the session changes, so a delivery
    /// failure leaves the session in the details stage with no codes issued.
    pub fn submit_registration(&mut self, form: RegistrationForm) -> FlowResult<Vec<ViewDirective>> {
        let required = match self.session.validate(&form, &self.config) {
            Ok(required) => required,
            Err(error) => {
                tracing::info!(
                    event = "registration_rejected",
                    error_code = error.error_code(),
                    "Registration form failed validation"
                );
                return Err(error);
            }
        };

        let codes: Vec<IssuedCode> = required
            .iter()
            .map(|channel| IssuedCode::new(channel, self.generator.generate(), self.config.code_ttl_seconds))
            .collect();

        for code in &codes {
            let contact = form.contact(code.channel).map(str::trim).unwrap_or_default();
            match self.delivery.deliver_code(code.channel, contact, &code.code) {
                Ok(delivery_id) => {
                    tracing::info!(
                        channel = %code.channel,
                        contact = %masked(code.channel, contact),
                        delivery_id = %delivery_id,
                        session_id = %code.id,
                        event = "otp_issued",
                        "Verification code issued"
                    );
                }
                Err(reason) => {
                    tracing::error!(
                        channel = %code.channel,
                        contact = %masked(code.channel, contact),
                        error = %reason,
                        event = "otp_delivery_failed",
                        "Failed to deliver verification code"
                    );
                    let error = FlowError::Delivery {
                        channel: code.channel,
                        reason,
                    };
                    self.session.record_error(&error);
                    return Err(error);
                }
            }
        }

        Ok(self.session.apply_submission(&form, required, codes))
    }

    /// Check the code entered for one channel
    pub fn verify_channel(&mut self, channel: Channel, entered_code: &str) -> FlowResult<Vec<ViewDirective>> {
        let result = self.session.verify(channel, entered_code, &self.config, Utc::now());
        match &result {
            Ok(directives) if !directives.is_empty() => {
                tracing::info!(
                    channel = %channel,
                    ready = self.session.is_ready_to_finalize(),
                    event = "otp_verified_success",
                    "Channel verified"
                );
            }
            Ok(_) => {}
            Err(error) => {
                tracing::warn!(
                    channel = %channel,
                    error_code = error.error_code(),
                    event = "otp_verification_failed",
                    "Verification code rejected"
                );
            }
        }
        result
    }

    pub fn is_ready_to_finalize(&self) -> bool {
        self.session.is_ready_to_finalize()
    }

    /// Create the account and reset back to the sign-in panel
    pub fn finalize_account(&mut self) -> FlowResult<FinalizeResult> {
        let profile = self
            .session
            .profile()
            .ok_or_else(|| FlowError::contract("finalize_account", "not every required channel is verified"))?;

        let account_id = match self.accounts.create_account(&profile) {
            Ok(account_id) => account_id,
            Err(reason) => {
                tracing::error!(
                    role = %profile.role,
                    error = %reason,
                    event = "account_creation_failed",
                    "Account creation failed"
                );
                let error = FlowError::AccountCreation { reason };
                self.session.record_error(&error);
                return Err(error);
            }
        };

        tracing::info!(
            account_id = %account_id,
            role = %profile.role,
            event = "account_created",
            "Account created from verified sign-up"
        );

        Ok(FinalizeResult {
            account_id,
            directives: self.session.complete(),
        })
    }

    /// Back out of the flow, discarding everything entered
    pub fn reset(&mut self) -> Vec<ViewDirective> {
        tracing::debug!(stage = ?self.session.stage(), event = "signup_reset", "Sign-up session reset");
        self.session.reset()
    }
}
