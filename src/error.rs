//! Error types for the TMI client.
//!
//! Parsing and tag decoding never fail, so every error here comes from
//! configuration, send validation, or the network.

use thiserror::Error;

use crate::validation::ValidationError;

/// Convenience type alias for Results using [`ClientError`].
pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Errors raised while building or using a client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// I/O error while opening the connection or writing a line.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TLS server name could not be derived from the host.
    #[error("invalid tls server name: {0}")]
    InvalidServerName(String),

    /// No socket is open.
    #[error("not connected")]
    NotConnected,

    /// Refused to send an empty line.
    #[error("refusing to send an empty message")]
    EmptyMessage,

    /// The line is longer than the protocol allows.
    #[error("message too long: {len} bytes (max {max})")]
    MessageTooLong {
        /// Length of the rejected line.
        len: usize,
        /// Protocol limit.
        max: usize,
    },

    /// The line contains CR, LF or NUL, which would smuggle a second command.
    #[error("message contains a line break")]
    IllegalLineBreak,

    /// Channel name is neither `#login` nor a chat-room name.
    #[error("invalid channel {channel:?}: {cause}")]
    InvalidChannel {
        /// The rejected channel.
        channel: String,
        /// Why it was rejected.
        #[source]
        cause: ValidationError,
    },

    /// The identity collaborator could not resolve the token's owner.
    #[error("could not resolve identity: {0}")]
    Identity(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Invalid constructor arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// Host was empty.
    #[error("host must not be empty")]
    EmptyHost,

    /// Port was zero.
    #[error("port must not be zero")]
    InvalidPort,

    /// Nick was empty.
    #[error("nick must not be empty")]
    EmptyNick,

    /// Token was empty.
    #[error("token must not be empty")]
    EmptyToken,

    /// Nick does not follow the platform's login grammar.
    #[error("invalid nick {nick:?}: {cause}")]
    InvalidNick {
        /// The rejected nick.
        nick: String,
        /// Why it was rejected.
        #[source]
        cause: ValidationError,
    },

    /// An environment variable was missing or unreadable.
    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    /// An environment variable did not parse.
    #[error("invalid value for environment variable {0}")]
    InvalidEnv(&'static str),
}
