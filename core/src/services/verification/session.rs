//! Sign-up session state and its transitions
//!
//! `VerificationSession` owns everything one sign-up attempt accumulates.
//! Every transition mutates the session and returns the view directives
//! the change implies; collaborators are never called from here.

use chrono::{DateTime, Utc};
use std::fmt;

use oh_shared::utils::validation::{is_provided, is_verification_code_format, min_length};

use crate::domain::entities::account::{AccountProfile, AccountRole};
use crate::domain::entities::channel::{Channel, ChannelSet};
use crate::domain::entities::verification_code::{CodeRejection, IssuedCode};
use crate::errors::{FlowError, FlowResult, RegistrationError};

use super::config::VerificationFlowConfig;
use super::types::{Panel, RegistrationForm, Stage, ViewDirective};

/// Mutable state of a single sign-up attempt
#[derive(Clone, Default)]
pub struct VerificationSession {
    panel: Panel,
    stage: Stage,
    role: Option<AccountRole>,
    display_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    password: String,
    robot_attested: bool,
    required: ChannelSet,
    issued: Vec<IssuedCode>,
    verified: ChannelSet,
    last_error: Option<String>,
}

impl VerificationSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel(&self) -> Panel {
        self.panel
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn role(&self) -> Option<AccountRole> {
        self.role
    }

    pub fn required_channels(&self) -> ChannelSet {
        self.required
    }

    pub fn verified_channels(&self) -> ChannelSet {
        self.verified
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn robot_attested(&self) -> bool {
        self.robot_attested
    }

    /// Contact value stored for a required channel
    pub fn contact(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Email => self.email.as_deref(),
            Channel::Phone => self.phone.as_deref(),
        }
    }

    /// Code currently issued for a channel
    pub fn issued_code(&self, channel: Channel) -> Option<&IssuedCode> {
        self.issued.iter().find(|code| code.channel == channel)
    }

    pub fn show_panel(&mut self, panel: Panel) -> Vec<ViewDirective> {
        self.panel = panel;
        vec![ViewDirective::ShowPanel { panel }]
    }

    /// Pick a role and open the registration details
    ///
    /// Ignored once codes are issued; the role is fixed until reset.
    pub fn select_role(&mut self, role: AccountRole) -> Vec<ViewDirective> {
        if self.stage == Stage::Verification {
            tracing::debug!(role = %role, "Role change ignored during verification");
            return Vec::new();
        }

        self.role = Some(role);
        self.stage = Stage::Details;
        vec![
            ViewDirective::HighlightRole { role: Some(role) },
            ViewDirective::ShowStage { stage: Stage::Details },
        ]
    }

    /// Validate a submission and compute the channels it requires
    ///
    /// Checks run in order and stop at the first failure. Only the shown
    /// error changes on failure.
    pub fn validate(
        &mut self,
        form: &RegistrationForm,
        config: &VerificationFlowConfig,
    ) -> FlowResult<ChannelSet> {
        let result = Self::required_for(self.role, form, config);
        if let Err(error) = &result {
            self.record_error(error);
        }
        result
    }

    fn required_for(
        role: Option<AccountRole>,
        form: &RegistrationForm,
        config: &VerificationFlowConfig,
    ) -> FlowResult<ChannelSet> {
        if role.is_none() {
            return Err(RegistrationError::RoleNotSelected.into());
        }

        let required: ChannelSet = Channel::ALL
            .into_iter()
            .filter(|channel| is_provided(form.contact(*channel)))
            .collect();
        if required.is_empty() {
            return Err(RegistrationError::NoContactChannel.into());
        }

        if !min_length(&form.password, config.min_password_length) {
            return Err(RegistrationError::PasswordTooShort {
                min_length: config.min_password_length,
            }
            .into());
        }

        if !form.robot_attested {
            return Err(RegistrationError::RobotCheckMissing.into());
        }

        Ok(required)
    }

    /// Enter the verification stage with freshly issued codes
    ///
    /// Replaces any earlier codes and verified flags. `codes` must hold
    /// exactly one code per channel in `required`.
    pub fn apply_submission(
        &mut self,
        form: &RegistrationForm,
        required: ChannelSet,
        codes: Vec<IssuedCode>,
    ) -> Vec<ViewDirective> {
        debug_assert_eq!(codes.iter().map(|code| code.channel).collect::<ChannelSet>(), required);
        debug_assert_eq!(codes.len(), required.len());

        let trimmed = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        self.display_name = trimmed(form.display_name.as_deref());
        self.email = trimmed(form.email.as_deref());
        self.phone = trimmed(form.phone.as_deref());
        self.password = form.password.clone();
        self.robot_attested = form.robot_attested;
        self.required = required;
        self.issued = codes;
        self.verified = ChannelSet::new();
        self.last_error = None;
        self.stage = Stage::Verification;

        let mut directives = vec![ViewDirective::ClearError, ViewDirective::HideFinalizeAction];
        for channel in Channel::ALL {
            directives.extend(Self::fresh_channel(channel));
            if required.contains(channel) {
                directives.push(ViewDirective::ShowCodeInput { channel });
            } else {
                directives.push(ViewDirective::HideCodeInput { channel });
            }
        }
        directives.push(ViewDirective::ShowStage { stage: Stage::Verification });
        directives
    }

    /// Check an entered code for one channel
    ///
    /// Channels that are not required, or already verified, are ignored.
    pub fn verify(
        &mut self,
        channel: Channel,
        entered: &str,
        config: &VerificationFlowConfig,
        now: DateTime<Utc>,
    ) -> FlowResult<Vec<ViewDirective>> {
        if self.stage != Stage::Verification || !self.required.contains(channel) {
            tracing::debug!(channel = %channel, stage = ?self.stage, "Verification for a channel that is not required ignored");
            return Ok(Vec::new());
        }
        if self.verified.contains(channel) {
            return Ok(Vec::new());
        }

        let code = self
            .issued
            .iter_mut()
            .find(|code| code.channel == channel)
            .ok_or_else(|| FlowError::contract("verify_channel", format!("no code issued for {}", channel)))?;

        // Malformed input never reaches the attempt budget
        if !is_verification_code_format(entered) {
            let error = FlowError::CodeMismatch { channel };
            self.record_error(&error);
            return Err(error);
        }

        if let Err(rejection) = code.check(entered, config.max_attempts, now) {
            let error = match rejection {
                CodeRejection::Mismatch { .. } => FlowError::CodeMismatch { channel },
                CodeRejection::Expired => FlowError::CodeExpired { channel },
                CodeRejection::AttemptsExhausted => FlowError::AttemptsExhausted { channel },
            };
            self.record_error(&error);
            return Err(error);
        }

        self.verified.insert(channel);
        self.last_error = None;

        let mut directives = vec![
            ViewDirective::LockCodeInput { channel },
            ViewDirective::HideVerifyAction { channel },
            ViewDirective::ShowVerifiedMark { channel },
            ViewDirective::ClearError,
        ];
        if self.is_ready_to_finalize() {
            directives.push(ViewDirective::ShowFinalizeAction);
            directives.extend(
                Channel::ALL
                    .into_iter()
                    .filter(|other| *other != channel)
                    .map(|other| ViewDirective::HideVerifyAction { channel: other }),
            );
        }
        Ok(directives)
    }

    /// Every required channel is verified
    pub fn is_ready_to_finalize(&self) -> bool {
        self.stage == Stage::Verification && !self.required.is_empty() && self.required.is_subset(&self.verified)
    }

    /// The verified profile, available only once ready to finalize
    pub fn profile(&self) -> Option<AccountProfile> {
        let role = self.role?;
        if !self.is_ready_to_finalize() {
            return None;
        }

        Some(AccountProfile {
            role,
            display_name: self.display_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
        })
    }

    /// Reset after account creation and return to the sign-in panel
    pub fn complete(&mut self) -> Vec<ViewDirective> {
        let mut directives = self.reset();
        directives.extend(self.show_panel(Panel::SignIn));
        directives
    }

    /// Clear the whole session back to role selection, keeping the panel
    pub fn reset(&mut self) -> Vec<ViewDirective> {
        *self = Self {
            panel: self.panel,
            ..Self::default()
        };

        let mut directives = vec![
            ViewDirective::ResetForm,
            ViewDirective::ClearError,
            ViewDirective::HighlightRole { role: None },
        ];
        for channel in Channel::ALL {
            directives.extend(Self::fresh_channel(channel));
            directives.push(ViewDirective::HideCodeInput { channel });
        }
        directives.push(ViewDirective::HideFinalizeAction);
        directives.push(ViewDirective::ShowStage { stage: Stage::RoleSelection });
        directives
    }

    /// Undo what a successful verification did to a channel's controls
    fn fresh_channel(channel: Channel) -> [ViewDirective; 3] {
        [
            ViewDirective::UnlockCodeInput { channel },
            ViewDirective::ShowVerifyAction { channel },
            ViewDirective::HideVerifiedMark { channel },
        ]
    }

    /// Show a user-facing error under the form
    pub fn record_error(&mut self, error: &FlowError) {
        if let Some(message) = error.user_message() {
            self.last_error = Some(message);
        }
    }
}

impl fmt::Debug for VerificationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VerificationSession")
            .field("panel", &self.panel)
            .field("stage", &self.stage)
            .field("role", &self.role)
            .field("required", &self.required)
            .field("verified", &self.verified)
            .field("issued", &self.issued.iter().map(|code| code.channel).collect::<Vec<_>>())
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
