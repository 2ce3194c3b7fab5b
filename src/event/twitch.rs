//! Payloads for Twitch's own commands and for the Twitch flavour of
//! `PRIVMSG`, `NOTICE`, `JOIN` and `PART`.
//!
//! Tag-derived fields go through [`crate::tags`], so a missing tag yields
//! that decoder's default rather than an error.
//!
//! # Reference
//! - <https://dev.twitch.tv/docs/irc/commands/>
//! - <https://dev.twitch.tv/docs/irc/tags/>

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::caps::{self, CapVerdict, Capability};
use crate::event::irc::strip_action;
use crate::message::Message;
use crate::tags::{self, Badge, BadgeInfo, BadgeKind, Color, Emote, UserType};
use crate::twitch::Channel;

/// Who sent a message, from the user tags Twitch attaches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserInfo {
    pub login: String,
    pub display_name: String,
    /// `-1` when the `user-id` tag is missing.
    pub user_id: i64,
    pub color: Option<Color>,
    pub badges: Vec<Badge>,
    pub badge_info: Vec<BadgeInfo>,
    pub user_type: UserType,
    pub moderator: bool,
    pub subscriber: bool,
    pub turbo: bool,
    pub vip: bool,
}

impl UserInfo {
    /// Decode the sender of `message`. The login comes from the `login`
    /// tag when present (server-originated lines), else from the prefix.
    pub fn new(message: &Message) -> Self {
        let t = message.tags();
        let login = match tags::string(t, "login") {
            login if login.is_empty() => message.nick().to_owned(),
            login => login,
        };

        Self {
            login,
            display_name: tags::string(t, "display-name"),
            user_id: tags::integer(t, "user-id"),
            color: tags::color(t, "color"),
            badges: tags::badges(t, "badges"),
            badge_info: tags::badge_info(t, "badge-info"),
            user_type: tags::kind(t, "user-type"),
            moderator: tags::boolean(t, "mod"),
            subscriber: tags::boolean(t, "subscriber"),
            turbo: tags::boolean(t, "turbo"),
            vip: tags::has(t, "vip"),
        }
    }

    pub fn has_badge(&self, kind: &BadgeKind) -> bool {
        self.badges.iter().any(|badge| &badge.kind == kind)
    }

    pub fn is_broadcaster(&self) -> bool {
        self.has_badge(&BadgeKind::Broadcaster)
    }

    /// Display name, falling back to the login when it is empty.
    pub fn name(&self) -> &str {
        if self.display_name.is_empty() {
            &self.login
        } else {
            &self.display_name
        }
    }
}

/// The message a reply is threaded under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyParent {
    pub message_id: String,
    pub user_id: i64,
    pub login: String,
    pub display_name: String,
    pub body: String,
    /// Top-level message of the thread.
    pub thread_message_id: String,
}

impl ReplyParent {
    fn new(message: &Message) -> Option<Self> {
        let t = message.tags();
        if !tags::has(t, "reply-parent-msg-id") {
            return None;
        }
        Some(Self {
            message_id: tags::string(t, "reply-parent-msg-id"),
            user_id: tags::integer(t, "reply-parent-user-id"),
            login: tags::string(t, "reply-parent-user-login"),
            display_name: tags::string(t, "reply-parent-display-name"),
            body: tags::string(t, "reply-parent-msg-body"),
            thread_message_id: tags::string(t, "reply-thread-parent-msg-id"),
        })
    }
}

/// A chat message in a channel (`PRIVMSG`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub sender: UserInfo,
    pub text: String,
    pub action: bool,
    /// Message UUID, usable with `CLEARMSG` and replies.
    pub id: String,
    pub room_id: i64,
    /// Cheer amount; `0` when the message carried no bits.
    pub bits: i64,
    pub emotes: Vec<Emote>,
    pub first_message: bool,
    pub returning_chatter: bool,
    pub custom_reward_id: String,
    pub reply: Option<ReplyParent>,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        let (text, action) = strip_action(message.trailing());
        Self {
            channel: Channel::parse(message.middle_param(0)),
            sender: UserInfo::new(&message),
            text: text.to_owned(),
            action,
            id: tags::string(t, "id"),
            room_id: tags::integer(t, "room-id"),
            bits: tags::bits(t, "bits"),
            emotes: tags::emotes(t, "emotes"),
            first_message: tags::boolean(t, "first-msg"),
            returning_chatter: tags::boolean(t, "returning-chatter"),
            custom_reward_id: tags::string(t, "custom-reward-id"),
            reply: ReplyParent::new(&message),
            sent_at: tags::timestamp(t, "tmi-sent-ts"),
            message,
        }
    }

    /// Text of every emote occurrence, in tag order.
    pub fn emote_names(&self) -> Vec<&str> {
        self.emotes
            .iter()
            .flat_map(|emote| emote.names(&self.text))
            .collect()
    }
}

/// A server notice for a channel (`NOTICE` with a `msg-id`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelNotice {
    pub message: Arc<Message>,
    pub channel: Channel,
    /// e.g. `msg_banned`, `slow_on`. Empty for notices without one.
    pub msg_id: String,
    pub target_user_id: i64,
    pub text: String,
}

impl ChannelNotice {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        Self {
            channel: Channel::parse(message.middle_param(0)),
            msg_id: tags::string(t, "msg-id"),
            target_user_id: tags::integer(t, "target-user-id"),
            text: message.trailing().to_owned(),
            message,
        }
    }
}

/// A user joined a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelJoin {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub login: String,
}

impl ChannelJoin {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            channel: Channel::parse(channel_param(&message)),
            login: message.nick().to_owned(),
            message,
        }
    }
}

/// A user left a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelPart {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub login: String,
}

impl ChannelPart {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            channel: Channel::parse(channel_param(&message)),
            login: message.nick().to_owned(),
            message,
        }
    }
}

/// Server answer to a `CAP REQ`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CapabilityReply {
    pub message: Arc<Message>,
    pub verdict: CapVerdict,
    pub capabilities: Vec<Capability>,
}

impl CapabilityReply {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            verdict: CapVerdict::from(message.middle_param(1)),
            capabilities: caps::parse_list(message.trailing()),
            message,
        }
    }

    pub fn acknowledged(&self, capability: &Capability) -> bool {
        self.verdict == CapVerdict::Ack && self.capabilities.contains(capability)
    }
}

/// A timeout, a ban, or a full chat clear (`CLEARCHAT`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearChat {
    pub message: Arc<Message>,
    pub channel: Channel,
    /// Affected login; `None` when the whole chat was cleared.
    pub target: Option<String>,
    pub target_user_id: i64,
    /// Timeout length in seconds; `-1` for a permanent ban or a clear.
    pub ban_duration: i64,
    pub room_id: i64,
    pub sent_at: DateTime<Utc>,
}

impl ClearChat {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        Self {
            channel: Channel::parse(message.middle_param(0)),
            target: non_empty(message.trailing()),
            target_user_id: tags::integer(t, "target-user-id"),
            ban_duration: tags::integer(t, "ban-duration"),
            room_id: tags::integer(t, "room-id"),
            sent_at: tags::timestamp(t, "tmi-sent-ts"),
            message,
        }
    }

    /// Whether this was a timeout rather than a ban or clear.
    pub fn is_timeout(&self) -> bool {
        self.ban_duration >= 0
    }
}

/// A single message deleted (`CLEARMSG`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClearMsg {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub login: String,
    pub target_message_id: String,
    /// Text of the deleted message.
    pub text: String,
    pub room_id: i64,
    pub sent_at: DateTime<Utc>,
}

impl ClearMsg {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        Self {
            channel: Channel::parse(message.middle_param(0)),
            login: tags::string(t, "login"),
            target_message_id: tags::string(t, "target-msg-id"),
            text: message.trailing().to_owned(),
            room_id: tags::integer(t, "room-id"),
            sent_at: tags::timestamp(t, "tmi-sent-ts"),
            message,
        }
    }
}

/// Our own user, sent once after login (`GLOBALUSERSTATE`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlobalUserState {
    pub message: Arc<Message>,
    pub user: UserInfo,
    pub emote_sets: Vec<String>,
}

impl GlobalUserState {
    pub fn new(message: Arc<Message>) -> Self {
        Self {
            user: UserInfo::new(&message),
            emote_sets: tags::list(message.tags(), "emote-sets"),
            message,
        }
    }
}

/// Start or end of hosting (`HOSTTARGET`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostTarget {
    pub message: Arc<Message>,
    pub channel: Channel,
    /// Hosted channel; `None` when hosting stopped (`-`).
    pub target: Option<String>,
    /// `-1` when not sent.
    pub viewers: i64,
}

impl HostTarget {
    pub fn new(message: Arc<Message>) -> Self {
        let mut words = message.trailing().split_whitespace();
        let target = words.next().filter(|t| *t != "-").map(str::to_owned);
        let viewers = words.next().map_or(-1, tags::number_or_unknown);
        Self {
            channel: Channel::parse(message.middle_param(0)),
            target,
            viewers,
            message,
        }
    }
}

/// The server is about to restart; reconnect (`RECONNECT`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconnect {
    pub message: Arc<Message>,
}

impl Reconnect {
    pub fn new(message: Arc<Message>) -> Self {
        Self { message }
    }
}

/// Chat room settings (`ROOMSTATE`).
///
/// After the first full ROOMSTATE on join, Twitch sends only the setting
/// that changed, so every setting is optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomState {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub room_id: i64,
    pub emote_only: Option<bool>,
    /// Minutes a user must follow before chatting; `-1` disables.
    pub followers_only: Option<i64>,
    pub unique_chat: Option<bool>,
    /// Seconds between messages.
    pub slow: Option<i64>,
    pub subscribers_only: Option<bool>,
}

impl RoomState {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        let flag = |key| tags::has(t, key).then(|| tags::boolean(t, key));
        let number = |key| tags::has(t, key).then(|| tags::integer(t, key));

        Self {
            channel: Channel::parse(message.middle_param(0)),
            room_id: tags::integer(t, "room-id"),
            emote_only: flag("emote-only"),
            followers_only: number("followers-only"),
            unique_chat: flag("r9k"),
            slow: number("slow"),
            subscribers_only: flag("subs-only"),
            message,
        }
    }
}

/// Our own state in a channel (`USERSTATE`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserState {
    pub message: Arc<Message>,
    pub channel: Channel,
    pub user: UserInfo,
    pub emote_sets: Vec<String>,
    /// Id of the message we just sent, when this answers a `PRIVMSG`.
    pub id: String,
}

impl UserState {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        Self {
            channel: Channel::parse(message.middle_param(0)),
            user: UserInfo::new(&message),
            emote_sets: tags::list(t, "emote-sets"),
            id: tags::string(t, "id"),
            message,
        }
    }
}

/// A private message (`WHISPER`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Whisper {
    pub message: Arc<Message>,
    pub sender: UserInfo,
    pub recipient: String,
    pub text: String,
    pub message_id: String,
    pub thread_id: String,
    pub emotes: Vec<Emote>,
}

impl Whisper {
    pub fn new(message: Arc<Message>) -> Self {
        let t = message.tags();
        Self {
            sender: UserInfo::new(&message),
            recipient: message.middle_param(0).to_owned(),
            text: message.trailing().to_owned(),
            message_id: tags::string(t, "message-id"),
            thread_id: tags::string(t, "thread-id"),
            emotes: tags::emotes(t, "emotes"),
            message,
        }
    }
}

fn channel_param(message: &Message) -> &str {
    match message.middle_param(0) {
        "" => message.trailing(),
        channel => channel,
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_owned())
}
