//! Payloads for the RFC 1459 commands and numerics TMI sends.
//!
//! Every payload keeps the parsed line it was built from in `message`.

use std::sync::Arc;

use crate::message::Message;
use crate::response::Response;

/// `001 RPL_WELCOME`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Welcome {
    pub message: Arc<Message>,
    /// Nick the server registered us under.
    pub nick: String,
    pub text: String,
}

impl Welcome {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            nick: message.param(0).to_owned(),
            text: message.trailing().to_owned(),
            message,
        }
    }
}

/// `002`, `003` and `004`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerInfo {
    pub message: Arc<Message>,
    pub code: Option<Response>,
    pub text: String,
}

impl ServerInfo {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            code: message.command().parse().ok(),
            text: message.trailing().to_owned(),
            message,
        }
    }
}

/// Position of a line within the message of the day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotdPart {
    /// `375`
    Start,
    /// `372`
    Line,
    /// `376`
    End,
}

/// One line of the message of the day.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Motd {
    pub message: Arc<Message>,
    pub part: MotdPart,
    pub text: String,
}

impl Motd {
    pub fn new(message: Arc<Message>) -> Self {
        let part = match message.command() {
            "375" => MotdPart::Start,
            "376" => MotdPart::End,
            _ => MotdPart::Line,
        };
        Self {
            part,
            text: message.trailing().to_owned(),
            message,
        }
    }
}

/// A complete `353`..`366` NAMES listing for one channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Names {
    /// The closing `366` line.
    pub message: Arc<Message>,
    pub channel: String,
    pub nicks: Vec<String>,
}

/// `421 ERR_UNKNOWNCOMMAND`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCommand {
    pub message: Arc<Message>,
    /// The command the server did not recognise.
    pub command: String,
    pub text: String,
}

impl UnknownCommand {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            command: message.middle_param(1).to_owned(),
            text: message.trailing().to_owned(),
            message,
        }
    }
}

/// `PING`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ping {
    pub message: Arc<Message>,
    /// Token to echo back in the `PONG`.
    pub token: String,
}

impl Ping {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            token: echo_token(&message).to_owned(),
            message,
        }
    }

    /// The reply line for this ping.
    pub fn reply(&self) -> String {
        format!("PONG :{}", self.token)
    }
}

/// `PONG`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pong {
    pub message: Arc<Message>,
    pub token: String,
}

impl Pong {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            token: echo_token(&message).to_owned(),
            message,
        }
    }
}

/// `PING :tok` and `PING tok` carry the token in different places.
fn echo_token(message: &Message) -> &str {
    match message.trailing() {
        "" => message
            .params()
            .iter()
            .rev()
            .find(|p| !p.is_empty())
            .map_or("", String::as_str),
        trailing => trailing,
    }
}

/// `JOIN`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Join {
    pub message: Arc<Message>,
    pub nick: String,
    pub channel: String,
}

impl Join {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            nick: message.nick().to_owned(),
            channel: first_param(&message).to_owned(),
            message,
        }
    }
}

/// `PART`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Part {
    pub message: Arc<Message>,
    pub nick: String,
    pub channel: String,
    pub reason: String,
}

impl Part {
    pub fn new(message: Arc<Message>) -> Self {
        let reason = if message.middle().is_empty() {
            String::new()
        } else {
            message.trailing().to_owned()
        };
        Self {
            nick: message.nick().to_owned(),
            channel: first_param(&message).to_owned(),
            reason,
            message,
        }
    }
}

/// `PRIVMSG`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivMsg {
    pub message: Arc<Message>,
    pub sender: String,
    pub target: String,
    /// Message text, with any CTCP `ACTION` wrapper removed.
    pub text: String,
    /// Whether the text was a `/me` action.
    pub action: bool,
}

impl PrivMsg {
    pub fn new(message: Arc<Message>) -> Self {
        let (text, action) = strip_action(message.trailing());
        Self {
            sender: message.nick().to_owned(),
            target: message.middle_param(0).to_owned(),
            text: text.to_owned(),
            action,
            message,
        }
    }
}

/// Unwrap `\x01ACTION text\x01`.
pub(crate) fn strip_action(text: &str) -> (&str, bool) {
    match text
        .strip_prefix("\x01ACTION ")
        .map(|rest| rest.strip_suffix('\x01').unwrap_or(rest))
    {
        Some(inner) => (inner, true),
        None => (text, false),
    }
}

/// `NOTICE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub message: Arc<Message>,
    /// Sender nick, or the server name for server notices.
    pub sender: String,
    pub target: String,
    pub text: String,
}

impl Notice {
    pub fn new(message: Arc<Message>) -> Self {
        let sender = if message.nick().is_empty() {
            message.prefix()
        } else {
            message.nick()
        };
        Self {
            sender: sender.to_owned(),
            target: message.middle_param(0).to_owned(),
            text: message.trailing().to_owned(),
            message,
        }
    }
}

/// `MODE`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mode {
    pub message: Arc<Message>,
    pub channel: String,
    /// Mode string such as `+o` or `-o`.
    pub modes: String,
    pub args: Vec<String>,
}

impl Mode {
    pub fn new(message: Arc<Message>) -> Self {
        let mut rest = message.params().iter().filter(|p| !p.is_empty());
        let channel = rest.next().cloned().unwrap_or_default();
        let modes = rest.next().cloned().unwrap_or_default();
        let args = rest.cloned().collect();
        Self {
            channel,
            modes,
            args,
            message,
        }
    }

    /// `(granted, nick)` for every `o` change, pairing mode characters with
    /// arguments left to right.
    pub fn operator_changes(&self) -> Vec<(bool, String)> {
        let mut adding = true;
        let mut args = self.args.iter();
        let mut changes = Vec::new();

        for ch in self.modes.chars() {
            match ch {
                '+' => adding = true,
                '-' => adding = false,
                'o' => {
                    let nick = args.next().cloned().unwrap_or_default();
                    changes.push((adding, nick));
                }
                _ => {
                    args.next();
                }
            }
        }
        changes
    }
}

/// Operator status granted or revoked by a `MODE ... +o/-o`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelOperator {
    pub message: Arc<Message>,
    pub channel: String,
    pub nick: String,
    /// `true` for `+o`, `false` for `-o`.
    pub granted: bool,
}

/// `ERROR`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerError {
    pub message: Arc<Message>,
    pub reason: String,
}

impl ServerError {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            reason: message.trailing().to_owned(),
            message,
        }
    }
}

/// First non-empty parameter; `JOIN #chan` and `JOIN :#chan` both occur.
fn first_param(message: &Message) -> &str {
    message
        .params()
        .iter()
        .find(|p| !p.is_empty())
        .map_or("", String::as_str)
}
