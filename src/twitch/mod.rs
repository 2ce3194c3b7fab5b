//! Twitch extension layer.
//!
//! Channel classification and the extra handlers are available without
//! tokio. [`TmiClient`] and the identity collaborator need the `tokio`
//! feature.

pub mod channel;
mod handlers;

#[cfg(feature = "tokio")]
mod client;
#[cfg(feature = "tokio")]
pub mod identity;

pub use self::channel::{Channel, ChannelShape};
pub use self::handlers::{install, table};

#[cfg(feature = "tokio")]
pub use self::client::TmiClient;
#[cfg(feature = "tokio")]
pub use self::identity::{FixedIdentity, Identity, IdentityResolver};
