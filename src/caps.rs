//! Twitch capability negotiation.
//!
//! TMI exposes three vendor capabilities, each requested with
//! `CAP REQ :twitch.tv/<name>`. The server answers `CAP * ACK` or
//! `CAP * NAK` with the same list.
//!
//! # Reference
//! - <https://dev.twitch.tv/docs/irc/capabilities/>

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Capability namespace used by Twitch.
pub const NAMESPACE: &str = "twitch.tv";

/// A Twitch chat capability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Capability {
    /// JOIN/PART for other users, NAMES lists
    Membership,
    /// Message tags on every line
    Tags,
    /// Vendor commands such as CLEARCHAT, USERNOTICE, ROOMSTATE
    Commands,
    /// Anything else, by full name
    Custom(String),
}

/// The three capabilities a full-featured client requests.
pub const ALL: [Capability; 3] = [Capability::Membership, Capability::Tags, Capability::Commands];

impl AsRef<str> for Capability {
    fn as_ref(&self) -> &str {
        match self {
            Self::Membership => "twitch.tv/membership",
            Self::Tags => "twitch.tv/tags",
            Self::Commands => "twitch.tv/commands",
            Self::Custom(s) => s,
        }
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        match s {
            "twitch.tv/membership" => Self::Membership,
            "twitch.tv/tags" => Self::Tags,
            "twitch.tv/commands" => Self::Commands,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl Capability {
    /// The `CAP REQ` line requesting this capability.
    pub fn request_line(&self) -> String {
        format!("CAP REQ :{}", self.as_ref())
    }
}

/// Server verdict on a capability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CapVerdict {
    Ack,
    Nak,
    /// Any other subcommand (LS, LIST, ...).
    Other,
}

impl From<&str> for CapVerdict {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("ACK") {
            Self::Ack
        } else if s.eq_ignore_ascii_case("NAK") {
            Self::Nak
        } else {
            Self::Other
        }
    }
}

/// Parse a space-separated capability list from a `CAP` reply.
pub fn parse_list(list: &str) -> Vec<Capability> {
    list.split_whitespace().map(Capability::from).collect()
}
