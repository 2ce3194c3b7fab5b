//! # slirc-tmi
//!
//! An async client for the Twitch Messaging Interface (TMI), Twitch's
//! IRC-based chat protocol.
//!
//! ## Features
//!
//! - Total IRCv3 line parsing: every input yields a [`Message`]
//! - Typed, never-failing decoding of Twitch message tags
//! - A replaceable command dispatch table producing typed [`Event`]s
//! - Optional Tokio integration: TCP/TLS transport, reader and writer tasks,
//!   automatic `PONG`, and the [`TmiClient`] with capability negotiation
//!
//! ## Quick Start
//!
//! ### Parsing Lines
//!
//! ```rust
//! use slirc_tmi::Message;
//!
//! let raw = "@badges=moderator/1;color=#1E90FF :ronni!ronni@ronni.tmi.twitch.tv PRIVMSG #dallas :hi";
//! let message = Message::parse(raw);
//!
//! assert_eq!(message.command(), "PRIVMSG");
//! assert_eq!(message.nick(), "ronni");
//! assert_eq!(message.tag("color"), Some("#1E90FF"));
//! assert_eq!(message.trailing(), "hi");
//! ```
//!
//! ### Decoding Tags
//!
//! ```rust
//! use slirc_tmi::{tags, Message};
//!
//! let message = Message::parse("@bits=100;tmi-sent-ts=1507246572675 :a!a@a PRIVMSG #c :cheer100");
//! assert_eq!(tags::bits(message.tags(), "bits"), 100);
//! assert_eq!(tags::integer(message.tags(), "missing"), -1);
//! ```

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod caps;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod message;
pub mod response;
pub mod state;
pub mod tags;
pub mod twitch;
pub mod validation;

#[cfg(feature = "tokio")]
pub mod client;
#[cfg(feature = "tokio")]
pub mod transport;

pub use self::caps::Capability;
pub use self::dispatch::{Context, DispatchTable, Handler};
pub use self::error::{ClientError, ConfigError};
pub use self::event::Event;
pub use self::message::{Message, Tags};
pub use self::response::Response;
pub use self::state::{ConnectionState, StateMachine, Transition};
pub use self::twitch::{Channel, ChannelShape};
pub use self::validation::ValidationError;

#[cfg(feature = "tokio")]
pub use self::client::{ClientConfig, IrcClient, Token};
#[cfg(feature = "tokio")]
pub use self::transport::{LineCodec, MAX_LINE_LEN};
#[cfg(feature = "tokio")]
pub use self::twitch::{Identity, IdentityResolver, TmiClient};
