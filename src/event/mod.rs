//! Events raised by a client.
//!
//! Handlers turn each parsed line into one typed payload and wrap it in an
//! [`Event`]. Payloads share the parsed [`Message`] through an `Arc`, so
//! cloning an event is cheap.

pub mod irc;
pub mod notice;
pub mod twitch;

use std::io;
use std::sync::Arc;

use crate::message::Message;

pub use self::irc::{
    ChannelOperator, Join, Mode, Motd, MotdPart, Names, Notice, Part, Ping, Pong, PrivMsg,
    ServerError, ServerInfo, UnknownCommand, Welcome,
};
pub use self::notice::{BitsBadgeTier, Raid, Ritual, Subscription, UserNotice};
pub use self::twitch::{
    CapabilityReply, ChannelJoin, ChannelNotice, ChannelPart, ChatMessage, ClearChat, ClearMsg,
    GlobalUserState, HostTarget, Reconnect, ReplyParent, RoomState, UserInfo, UserState, Whisper,
};

/// Everything a client reports to its owner.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Event {
    /// `001` received; the handshake is complete.
    Connected(Welcome),
    /// The connection was closed by [`disconnect`](crate::IrcClient::disconnect).
    Disconnected,
    /// The connection failed while it was expected to be up. Call
    /// `reconnect` to recover.
    NetworkError(Arc<io::Error>),

    ServerInfo(ServerInfo),
    Motd(Motd),
    Names(Names),
    UnknownCommand(UnknownCommand),
    Ping(Ping),
    Pong(Pong),
    Join(Join),
    Part(Part),
    PrivMsg(PrivMsg),
    Notice(Notice),
    Mode(Mode),
    ChannelOperator(ChannelOperator),
    ServerError(ServerError),

    Capability(CapabilityReply),
    ChatMessage(ChatMessage),
    ChannelNotice(ChannelNotice),
    ChannelJoin(ChannelJoin),
    ChannelPart(ChannelPart),
    ClearChat(ClearChat),
    ClearMsg(ClearMsg),
    GlobalUserState(GlobalUserState),
    HostTarget(HostTarget),
    Reconnect(Reconnect),
    RoomState(RoomState),
    UserState(UserState),
    Whisper(Whisper),

    UserNotice(UserNotice),
    Subscription(Subscription),
    Raid(Raid),
    Ritual(Ritual),
    BitsBadgeTier(BitsBadgeTier),
}

impl Event {
    /// The line this event was built from, if it came from the wire.
    pub fn message(&self) -> Option<&Arc<Message>> {
        let message = match self {
            Self::Disconnected | Self::NetworkError(_) => return None,
            Self::Names(p) => &p.message,
            Self::Connected(p) => &p.message,
            Self::ServerInfo(p) => &p.message,
            Self::Motd(p) => &p.message,
            Self::UnknownCommand(p) => &p.message,
            Self::Ping(p) => &p.message,
            Self::Pong(p) => &p.message,
            Self::Join(p) => &p.message,
            Self::Part(p) => &p.message,
            Self::PrivMsg(p) => &p.message,
            Self::Notice(p) => &p.message,
            Self::Mode(p) => &p.message,
            Self::ChannelOperator(p) => &p.message,
            Self::ServerError(p) => &p.message,
            Self::Capability(p) => &p.message,
            Self::ChatMessage(p) => &p.message,
            Self::ChannelNotice(p) => &p.message,
            Self::ChannelJoin(p) => &p.message,
            Self::ChannelPart(p) => &p.message,
            Self::ClearChat(p) => &p.message,
            Self::ClearMsg(p) => &p.message,
            Self::GlobalUserState(p) => &p.message,
            Self::HostTarget(p) => &p.message,
            Self::Reconnect(p) => &p.message,
            Self::RoomState(p) => &p.message,
            Self::UserState(p) => &p.message,
            Self::Whisper(p) => &p.message,
            Self::UserNotice(p) => &p.message,
            Self::Subscription(p) => &p.message,
            Self::Raid(p) => &p.message,
            Self::Ritual(p) => &p.message,
            Self::BitsBadgeTier(p) => &p.message,
        };
        Some(message)
    }

    /// Short variant name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected(_) => "Connected",
            Self::Disconnected => "Disconnected",
            Self::NetworkError(_) => "NetworkError",
            Self::ServerInfo(_) => "ServerInfo",
            Self::Motd(_) => "Motd",
            Self::Names(_) => "Names",
            Self::UnknownCommand(_) => "UnknownCommand",
            Self::Ping(_) => "Ping",
            Self::Pong(_) => "Pong",
            Self::Join(_) => "Join",
            Self::Part(_) => "Part",
            Self::PrivMsg(_) => "PrivMsg",
            Self::Notice(_) => "Notice",
            Self::Mode(_) => "Mode",
            Self::ChannelOperator(_) => "ChannelOperator",
            Self::ServerError(_) => "ServerError",
            Self::Capability(_) => "Capability",
            Self::ChatMessage(_) => "ChatMessage",
            Self::ChannelNotice(_) => "ChannelNotice",
            Self::ChannelJoin(_) => "ChannelJoin",
            Self::ChannelPart(_) => "ChannelPart",
            Self::ClearChat(_) => "ClearChat",
            Self::ClearMsg(_) => "ClearMsg",
            Self::GlobalUserState(_) => "GlobalUserState",
            Self::HostTarget(_) => "HostTarget",
            Self::Reconnect(_) => "Reconnect",
            Self::RoomState(_) => "RoomState",
            Self::UserState(_) => "UserState",
            Self::Whisper(_) => "Whisper",
            Self::UserNotice(_) => "UserNotice",
            Self::Subscription(_) => "Subscription",
            Self::Raid(_) => "Raid",
            Self::Ritual(_) => "Ritual",
            Self::BitsBadgeTier(_) => "BitsBadgeTier",
        }
    }
}
