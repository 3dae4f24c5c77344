//! Types exchanged between the verification flow and the view

use serde::{Deserialize, Serialize};

use crate::domain::entities::account::{AccountId, AccountRole};
use crate::domain::entities::channel::Channel;
use crate::errors::FlowError;

/// Which of the two side-by-side panels is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    #[default]
    SignIn,
    SignUp,
}

/// Step of the sign-up panel currently visible
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    #[default]
    RoleSelection,
    Details,
    Verification,
}

/// View instruction emitted by a transition
///
/// The view applies directives in order and never mutates flow state
/// itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "directive", rename_all = "snake_case")]
pub enum ViewDirective {
    ShowPanel { panel: Panel },
    ShowStage { stage: Stage },
    /// Highlight the chosen role card, `None` clears the highlight
    HighlightRole { role: Option<AccountRole> },
    /// Clear every form field
    ResetForm,
    ShowCodeInput { channel: Channel },
    HideCodeInput { channel: Channel },
    /// Disable the code input once the channel is verified
    LockCodeInput { channel: Channel },
    UnlockCodeInput { channel: Channel },
    ShowVerifyAction { channel: Channel },
    HideVerifyAction { channel: Channel },
    ShowVerifiedMark { channel: Channel },
    HideVerifiedMark { channel: Channel },
    ShowFinalizeAction,
    HideFinalizeAction,
    ShowError { message: String },
    ClearError,
}

impl ViewDirective {
    /// Directive showing an error under the form
    ///
    /// Contract violations have no user-facing text and yield `None`.
    pub fn for_error(error: &FlowError) -> Option<Self> {
        error.user_message().map(|message| ViewDirective::ShowError { message })
    }
}

/// Values captured by the registration details form
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: String,
    pub robot_attested: bool,
}

impl RegistrationForm {
    /// Raw value entered for a channel
    pub fn contact(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Email => self.email.as_deref(),
            Channel::Phone => self.phone.as_deref(),
        }
    }
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .field("robot_attested", &self.robot_attested)
            .finish()
    }
}

/// Result of a successful finalize
#[derive(Debug, Clone)]
pub struct FinalizeResult {
    /// Identifier assigned by account creation
    pub account_id: AccountId,
    /// Directives for the reset and the return to sign-in
    pub directives: Vec<ViewDirective>,
}
