//! Account roles and the verified profile handed to account creation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::channel::Channel;

/// Identifier returned by account creation
pub type AccountId = Uuid;

/// Role a new account is registered under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    /// A member of the public reporting hazards
    Citizen,
    /// A disaster-management authority reviewing reports
    Authority,
    /// Platform administrator
    Admin,
}

impl AccountRole {
    pub const ALL: [AccountRole; 3] = [AccountRole::Citizen, AccountRole::Authority, AccountRole::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccountRole::Citizen => "citizen",
            AccountRole::Authority => "authority",
            AccountRole::Admin => "admin",
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "citizen" => Ok(AccountRole::Citizen),
            "authority" => Ok(AccountRole::Authority),
            "admin" => Ok(AccountRole::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Fully verified registration, ready for account creation
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct AccountProfile {
    pub role: AccountRole,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(skip_serializing)]
    pub password: String,
}

impl AccountProfile {
    /// Contact value registered for a channel
    pub fn contact(&self, channel: Channel) -> Option<&str> {
        match channel {
            Channel::Email => self.email.as_deref(),
            Channel::Phone => self.phone.as_deref(),
        }
    }
}

impl fmt::Debug for AccountProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountProfile")
            .field("role", &self.role)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("phone", &self.phone)
            .field("password", &"<redacted>")
            .finish()
    }
}
