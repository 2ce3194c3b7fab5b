use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::debug;

use crate::caps::{self, Capability};
use crate::client::{ClientConfig, IrcClient};
use crate::dispatch::{Context, DispatchTable};
use crate::error::{ClientError, ConfigError, Result};
use crate::event::Event;
use crate::message::tags::escape_tag_value;
use crate::message::Message;
use crate::state::ConnectionState;
use crate::validation::{is_anonymous_login, validate_channel, validate_login};

use super::handlers;
use super::identity::{Identity, IdentityResolver};

/// A Twitch chat client.
///
/// Wraps an [`IrcClient`] whose dispatch table also decodes Twitch tags
/// and vendor commands, and remembers which capabilities to request on
/// every connection.
///
/// ```no_run
/// use slirc_tmi::client::ClientConfig;
/// use slirc_tmi::twitch::{FixedIdentity, Identity, TmiClient};
/// use slirc_tmi::event::Event;
///
/// # async fn run() -> Result<(), slirc_tmi::ClientError> {
/// let config = ClientConfig::twitch("justinfan12345", "anonymous")?;
/// let resolver = FixedIdentity(Identity::new(0, "justinfan12345"));
/// let (client, mut events) = TmiClient::new(config, &resolver).await?;
/// client.request_all()?;
/// client.connect().await?;
///
/// while let Some(event) = events.recv().await {
///     match event {
///         Event::Connected(_) => client.join("#dallas")?,
///         Event::ChatMessage(msg) => println!("{}: {}", msg.sender.name(), msg.text),
///         Event::Reconnect(_) => {
///             client.reconnect().await?;
///         }
///         _ => {}
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct TmiClient {
    inner: IrcClient,
    identity: Identity,
    capabilities: Mutex<Vec<Capability>>,
}

impl TmiClient {
    /// Validate the nick, resolve the token's owner and build a
    /// disconnected client with the Twitch handlers installed.
    pub async fn new<R>(
        config: ClientConfig,
        resolver: &R,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Event>)>
    where
        R: IdentityResolver + ?Sized,
    {
        config.validate()?;
        validate_login(&config.nick).map_err(|cause| ConfigError::InvalidNick {
            nick: config.nick.clone(),
            cause,
        })?;

        let identity = resolver
            .resolve(config.token.bearer())
            .await
            .map_err(|e| ClientError::Identity(e.into()))?;
        debug!(
            login = %identity.login,
            user_id = identity.user_id,
            anonymous = is_anonymous_login(&config.nick),
            "identity resolved"
        );

        let (inner, events) = IrcClient::new(config)?;
        let client = Self {
            inner,
            identity,
            capabilities: Mutex::new(Vec::new()),
        };
        client.reset_handlers();
        Ok((client, events))
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Logged in as `justinfan<digits>`: chat can be read but not sent.
    pub fn is_anonymous(&self) -> bool {
        is_anonymous_login(&self.inner.config().nick)
    }

    pub fn config(&self) -> &ClientConfig {
        self.inner.config()
    }

    pub fn state(&self) -> ConnectionState {
        self.inner.state()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.is_connected()
    }

    /// The underlying IRC client.
    pub fn irc(&self) -> &IrcClient {
        &self.inner
    }

    /// Capabilities requested so far, in request order.
    pub fn capabilities(&self) -> Vec<Capability> {
        self.capabilities.lock().clone()
    }

    /// Connect, then request every remembered capability.
    pub async fn connect(&self) -> Result<bool> {
        self.inner.connect_with(|| self.capability_lines()).await
    }

    pub async fn reconnect(&self) -> Result<bool> {
        self.inner.reconnect_with(|| self.capability_lines()).await
    }

    pub async fn disconnect(&self) -> bool {
        self.inner.disconnect().await
    }

    pub fn send(&self, line: impl Into<String>) -> Result<()> {
        self.inner.send(line)
    }

    pub async fn send_async(&self, line: impl Into<String>) -> Result<()> {
        self.inner.send_async(line).await
    }

    pub fn request_membership(&self) -> Result<()> {
        self.request(Capability::Membership)
    }

    pub fn request_tags(&self) -> Result<()> {
        self.request(Capability::Tags)
    }

    pub fn request_commands(&self) -> Result<()> {
        self.request(Capability::Commands)
    }

    pub fn request_all(&self) -> Result<()> {
        caps::ALL
            .iter()
            .try_for_each(|capability| self.request(capability.clone()))
    }

    /// Remember `capability` for every future connection and, when a
    /// session is open, request it now.
    ///
    /// Without an open session, including while the socket of a
    /// [`connect`](Self::connect) is still opening, the request goes out
    /// with the next handshake.
    pub fn request(&self, capability: Capability) -> Result<()> {
        let line = capability.request_line();
        {
            let mut requested = self.capabilities.lock();
            if !requested.contains(&capability) {
                requested.push(capability);
            }
        }

        match self.inner.send(line) {
            Err(ClientError::NotConnected) => {
                debug!("no open session, capability request deferred");
                Ok(())
            }
            result => result,
        }
    }

    pub fn join(&self, channel: &str) -> Result<()> {
        check_channel(channel)?;
        self.inner.join(channel)
    }

    pub fn part(&self, channel: &str) -> Result<()> {
        check_channel(channel)?;
        self.inner.part(channel)
    }

    pub fn privmsg(&self, channel: &str, text: &str) -> Result<()> {
        self.inner.privmsg(channel, text)
    }

    /// Answer the chat message `parent_id` in a thread.
    pub fn reply(&self, channel: &str, parent_id: &str, text: &str) -> Result<()> {
        self.inner.send(reply_line(channel, parent_id, text))
    }

    /// Install or replace the handler for `command`.
    ///
    /// # Panics
    ///
    /// Panics if `command` is empty.
    pub fn set_handler<F>(&self, command: &str, handler: F)
    where
        F: Fn(&mut Context<'_>, &Arc<Message>) + Send + Sync + 'static,
    {
        self.inner.set_handler(command, handler);
    }

    pub fn remove_handler(&self, command: &str) -> bool {
        self.inner.remove_handler(command)
    }

    /// Restore the default and Twitch handlers, dropping any custom ones.
    pub fn reset_handlers(&self) {
        self.inner.with_handlers(|table: &mut DispatchTable| {
            table.reset();
            handlers::install(table);
        });
    }

    fn capability_lines(&self) -> Vec<String> {
        self.capabilities
            .lock()
            .iter()
            .map(Capability::request_line)
            .collect()
    }
}

impl std::fmt::Debug for TmiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmiClient")
            .field("identity", &self.identity)
            .field("state", &self.state())
            .field("capabilities", &*self.capabilities.lock())
            .finish_non_exhaustive()
    }
}

fn check_channel(channel: &str) -> Result<()> {
    validate_channel(channel).map_err(|cause| ClientError::InvalidChannel {
        channel: channel.to_owned(),
        cause,
    })
}

fn reply_line(channel: &str, parent_id: &str, text: &str) -> String {
    format!(
        "@reply-parent-msg-id={} PRIVMSG {} :{}",
        escape_tag_value(parent_id),
        channel,
        text
    )
}
