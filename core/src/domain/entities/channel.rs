//! Contact channels a verification code can be issued through.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the two supported contact modalities
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Phone,
}

impl Channel {
    /// Every channel, in the order the form presents them
    pub const ALL: [Channel; 2] = [Channel::Email, Channel::Phone];

    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Phone => "phone",
        }
    }

    /// Capitalised name used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            Channel::Email => "Email",
            Channel::Phone => "Phone",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" | "mail" => Ok(Channel::Email),
            "phone" | "sms" => Ok(Channel::Phone),
            other => Err(format!("Unknown channel: {}", other)),
        }
    }
}

/// Set of channels, used for the required and verified sets of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSet {
    email: bool,
    phone: bool,
}

impl ChannelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, channel: Channel) {
        *self.slot(channel) = true;
    }

    pub fn contains(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.email,
            Channel::Phone => self.phone,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.email && !self.phone
    }

    pub fn len(&self) -> usize {
        self.email as usize + self.phone as usize
    }

    /// True when every member of `self` is also in `other`
    pub fn is_subset(&self, other: &ChannelSet) -> bool {
        self.iter().all(|channel| other.contains(channel))
    }

    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL.into_iter().filter(move |channel| self.contains(*channel))
    }

    fn slot(&mut self, channel: Channel) -> &mut bool {
        match channel {
            Channel::Email => &mut self.email,
            Channel::Phone => &mut self.phone,
        }
    }
}

impl FromIterator<Channel> for ChannelSet {
    fn from_iter<I: IntoIterator<Item = Channel>>(iter: I) -> Self {
        let mut set = ChannelSet::new();
        for channel in iter {
            set.insert(channel);
        }
        set
    }
}
