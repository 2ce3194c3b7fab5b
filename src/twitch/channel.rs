//! Channel addressing.
//!
//! Twitch addresses a channel either by its broadcaster's login (`#login`)
//! or, for chat rooms, by `#chatrooms:<owner_id>:<room_uuid>`.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const CHAT_ROOM_PREFIX: &str = "chatrooms:";

/// Which addressing scheme a channel name uses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ChannelShape {
    /// `#login`
    Plain {
        /// Broadcaster login, without `#`.
        login: String,
    },
    /// `#chatrooms:<owner_id>:<room_uuid>`
    ChatRoom {
        /// User id of the room's owner; `-1` when not a number.
        owner_id: i64,
        /// Room UUID.
        room_id: String,
    },
}

/// A channel parameter and its classified shape.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Channel {
    raw: String,
    shape: ChannelShape,
}

impl Channel {
    /// Classify a channel parameter. Never fails; anything that is not a
    /// well-formed chat-room name is a plain channel.
    ///
    /// ```
    /// use slirc_tmi::twitch::{Channel, ChannelShape};
    ///
    /// let room = Channel::parse("#chatrooms:44322889:04e762ec-ce8f-4cbc-b6a3-ffc871ab53da");
    /// assert_eq!(
    ///     room.shape(),
    ///     &ChannelShape::ChatRoom {
    ///         owner_id: 44322889,
    ///         room_id: "04e762ec-ce8f-4cbc-b6a3-ffc871ab53da".to_owned(),
    ///     }
    /// );
    ///
    /// let plain = Channel::parse("#dallas");
    /// assert_eq!(plain.login(), Some("dallas"));
    /// ```
    pub fn parse(raw: &str) -> Self {
        let name = raw.strip_prefix('#').unwrap_or(raw);

        let shape = name
            .strip_prefix(CHAT_ROOM_PREFIX)
            .and_then(|rest| rest.split_once(':'))
            .map(|(owner, room)| ChannelShape::ChatRoom {
                owner_id: crate::tags::number_or_unknown(owner),
                room_id: room.to_owned(),
            })
            .unwrap_or_else(|| ChannelShape::Plain {
                login: name.to_owned(),
            });

        Self {
            raw: raw.to_owned(),
            shape,
        }
    }

    /// The parameter as sent, including `#`.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn shape(&self) -> &ChannelShape {
        &self.shape
    }

    /// Broadcaster login for a plain channel.
    pub fn login(&self) -> Option<&str> {
        match &self.shape {
            ChannelShape::Plain { login } => Some(login),
            ChannelShape::ChatRoom { .. } => None,
        }
    }

    pub fn is_chat_room(&self) -> bool {
        matches!(self.shape, ChannelShape::ChatRoom { .. })
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for Channel {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}
