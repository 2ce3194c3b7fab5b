//! Async IRC client.
//!
//! [`IrcClient`] owns the connection lifecycle. Each connection runs two
//! tasks: a reader that frames, parses and dispatches incoming lines, and a
//! writer that owns the write half and sends queued lines in order.
//!
//! ```no_run
//! use slirc_tmi::client::{ClientConfig, IrcClient};
//! use slirc_tmi::event::Event;
//!
//! # async fn run() -> Result<(), slirc_tmi::ClientError> {
//! let config = ClientConfig::twitch("justinfan12345", "oauth:anonymous")?;
//! let (client, mut events) = IrcClient::new(config)?;
//! client.connect().await?;
//!
//! while let Some(event) = events.recv().await {
//!     match event {
//!         Event::Connected(_) => client.join("#dallas")?,
//!         Event::PrivMsg(msg) => println!("{}: {}", msg.sender, msg.text),
//!         Event::NetworkError(_) => {
//!             client.reconnect().await?;
//!         }
//!         _ => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod reader;
mod writer;

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, warn};

use crate::dispatch::{Context, DispatchTable};
use crate::error::{ClientError, ConfigError, Result};
use crate::event::Event;
use crate::message::Message;
use crate::state::{ConnectionState, StateMachine, Transition};
use crate::transport::{self, TransportStream, MAX_LINE_LEN};
use crate::validation::validate_message_line;

pub use self::config::{ClientConfig, Token, TWITCH_HOST, TWITCH_TLS_PORT};

use self::writer::Outgoing;

/// State shared with the reader task.
pub(crate) struct Shared {
    pub(crate) config: ClientConfig,
    pub(crate) state: StateMachine,
    pub(crate) handlers: RwLock<DispatchTable>,
    pub(crate) events: mpsc::UnboundedSender<Event>,
}

/// The tasks of one live connection.
struct Session {
    shutdown: oneshot::Sender<()>,
    reader: JoinHandle<()>,
    writer: JoinHandle<()>,
}

impl Session {
    /// Stop the reader, then give the writer `grace` to flush. A writer
    /// still parked on a peer that stopped reading is aborted.
    async fn close(self, grace: Duration) {
        let Session {
            shutdown,
            reader,
            mut writer,
        } = self;

        let _ = shutdown.send(());
        if let Err(e) = reader.await {
            warn!(error = %e, "reader task failed");
        }
        match time::timeout(grace, &mut writer).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "writer task failed"),
            Err(_) => {
                warn!(?grace, "writer did not finish, aborting");
                writer.abort();
            }
        }
    }
}

/// A connection to an IRC server.
///
/// All methods take `&self`; the client can be shared behind an `Arc` and
/// driven from several tasks.
pub struct IrcClient {
    shared: Arc<Shared>,
    outgoing: Mutex<Option<mpsc::UnboundedSender<Outgoing>>>,
    session: Mutex<Option<Session>>,
}

impl IrcClient {
    /// Create a disconnected client and the receiver for its events.
    pub fn new(config: ClientConfig) -> Result<(Self, mpsc::UnboundedReceiver<Event>), ConfigError> {
        config.validate()?;
        let (events, receiver) = mpsc::unbounded_channel();

        let client = Self {
            shared: Arc::new(Shared {
                config,
                state: StateMachine::new(),
                handlers: RwLock::new(DispatchTable::new()),
                events,
            }),
            outgoing: Mutex::new(None),
            session: Mutex::new(None),
        };
        Ok((client, receiver))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.shared.config
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.state.current()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    #[cfg(test)]
    pub(crate) fn state_machine(&self) -> &StateMachine {
        &self.shared.state
    }

    /// Open the connection and send `PASS` and `NICK`.
    ///
    /// Returns `Ok(false)` without touching the network unless the client
    /// is disconnected. The client is [`Connecting`](ConnectionState::Connecting)
    /// once this returns `Ok(true)`, and [`Connected`](ConnectionState::Connected)
    /// when the server's welcome arrives as [`Event::Connected`].
    pub async fn connect(&self) -> Result<bool> {
        self.connect_with(Vec::new).await
    }

    /// Like [`connect`](Self::connect), queueing the lines `after_handshake`
    /// returns right after `PASS` and `NICK`.
    ///
    /// `after_handshake` runs once the socket is open, with the session
    /// lock held, so a line a caller adds to its source during the connect
    /// is either in the returned batch or sent on the new session.
    pub(crate) async fn connect_with<F>(&self, after_handshake: F) -> Result<bool>
    where
        F: FnOnce() -> Vec<String>,
    {
        if !self.shared.state.apply(Transition::Connect) {
            return Ok(false);
        }
        drop(self.outgoing.lock().take());

        let config = &self.shared.config;
        let stream = match transport::open(&config.host, config.port).await {
            Ok(stream) => stream,
            Err(e) => {
                warn!(host = %config.host, port = config.port, error = %e, "connect failed");
                let _ = self.shared.state.apply(Transition::Abort);
                return Err(e);
            }
        };

        let handshake = vec![
            format!("PASS {}", config.token.pass()),
            format!("NICK {}", config.nick),
        ];
        self.start_session(stream, handshake, after_handshake);
        debug!(host = %config.host, port = config.port, "handshake sent");
        Ok(true)
    }

    fn start_session<F>(&self, stream: TransportStream, handshake: Vec<String>, after_handshake: F)
    where
        F: FnOnce() -> Vec<String>,
    {
        let (read_half, write_half) = tokio::io::split(stream);
        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown, shutdown_rx) = oneshot::channel();
        let (stop_writer, reader_done) = oneshot::channel();

        let mut outgoing = self.outgoing.lock();
        for line in handshake.into_iter().chain(after_handshake()) {
            let _ = tx.send(Outgoing::new(line));
        }

        let writer = tokio::spawn(writer::run(write_half, rx, reader_done));
        let reader = tokio::spawn(reader::run(
            Arc::clone(&self.shared),
            read_half,
            tx.clone(),
            shutdown_rx,
            stop_writer,
        ));

        *outgoing = Some(tx);
        drop(outgoing);
        let stale = self.session.lock().replace(Session {
            shutdown,
            reader,
            writer,
        });
        if stale.is_some() {
            debug!("replaced a finished session");
        }
    }

    /// Close the connection and wait for both tasks to stop.
    ///
    /// Queued lines are flushed first; the wait for that is bounded by
    /// [`ClientConfig::close_timeout`]. Returns `false` unless the client
    /// was connected.
    pub async fn disconnect(&self) -> bool {
        if !self.shared.state.apply(Transition::Disconnect) {
            return false;
        }

        let session = self.session.lock().take();
        drop(self.outgoing.lock().take());
        if let Some(session) = session {
            session.close(self.shared.config.close_timeout).await;
        }

        if !self.shared.state.apply(Transition::Cleanup) {
            warn!("state changed during disconnect");
        }
        let _ = self.shared.events.send(Event::Disconnected);
        debug!("disconnected");
        true
    }

    /// Disconnect if connected, then connect again.
    ///
    /// Returns `Ok(false)` while a connect or disconnect is in flight.
    pub async fn reconnect(&self) -> Result<bool> {
        self.reconnect_with(Vec::new).await
    }

    pub(crate) async fn reconnect_with<F>(&self, after_handshake: F) -> Result<bool>
    where
        F: FnOnce() -> Vec<String>,
    {
        match self.shared.state.reconnect_from() {
            None => Ok(false),
            Some(ConnectionState::Connected) => {
                self.disconnect().await;
                self.connect_with(after_handshake).await
            }
            Some(_) => self.connect_with(after_handshake).await,
        }
    }

    /// Queue `line` for sending without waiting for the write.
    pub fn send(&self, line: impl Into<String>) -> Result<()> {
        let (tx, line) = self.prepare(line.into())?;
        tx.send(Outgoing::new(line))
            .map_err(|_| ClientError::NotConnected)
    }

    /// Send `line` and wait until it has been written to the socket.
    pub async fn send_async(&self, line: impl Into<String>) -> Result<()> {
        let (tx, line) = self.prepare(line.into())?;
        let (outgoing, written) = Outgoing::acked(line);
        tx.send(outgoing).map_err(|_| ClientError::NotConnected)?;
        written.await.map_err(|_| ClientError::NotConnected)??;
        Ok(())
    }

    fn prepare(&self, line: String) -> Result<(mpsc::UnboundedSender<Outgoing>, String)> {
        let tx = match self.state() {
            ConnectionState::Connecting | ConnectionState::Connected => self.outgoing.lock().clone(),
            ConnectionState::Disconnected | ConnectionState::Disconnecting => None,
        }
        .ok_or(ClientError::NotConnected)?;
        check_line(&line)?;
        Ok((tx, line))
    }

    /// `JOIN <channel>`.
    pub fn join(&self, channel: &str) -> Result<()> {
        self.send(format!("JOIN {}", channel))
    }

    /// `PART <channel>`.
    pub fn part(&self, channel: &str) -> Result<()> {
        self.send(format!("PART {}", channel))
    }

    /// `PRIVMSG <target> :<text>`.
    pub fn privmsg(&self, target: &str, text: &str) -> Result<()> {
        self.send(format!("PRIVMSG {} :{}", target, text))
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
        self.shared.handlers.write().set(command, handler);
    }

    /// Remove the handler for `command`; its lines are then ignored.
    pub fn remove_handler(&self, command: &str) -> bool {
        self.shared.handlers.write().remove(command)
    }

    /// Restore the default handlers, dropping any custom ones.
    pub fn reset_handlers(&self) {
        self.shared.handlers.write().reset();
    }

    /// Edit the dispatch table in place.
    pub fn with_handlers<R>(&self, f: impl FnOnce(&mut DispatchTable) -> R) -> R {
        f(&mut self.shared.handlers.write())
    }
}

impl std::fmt::Debug for IrcClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IrcClient")
            .field("config", &self.shared.config)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Validation shared by [`IrcClient::send`] and [`IrcClient::send_async`].
pub(crate) fn check_line(line: &str) -> Result<()> {
    if line.is_empty() {
        return Err(ClientError::EmptyMessage);
    }
    validate_message_line(line).map_err(|_| ClientError::IllegalLineBreak)?;
    if line.len() > MAX_LINE_LEN {
        return Err(ClientError::MessageTooLong {
            len: line.len(),
            max: MAX_LINE_LEN,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> IrcClient {
        let config = ClientConfig::new("127.0.0.1", 6667, "ronni", "oauth:abc").unwrap();
        IrcClient::new(config).unwrap().0
    }

    #[test]
    fn test_check_line() {
        assert!(check_line("PRIVMSG #c :hi").is_ok());
        assert!(matches!(check_line(""), Err(ClientError::EmptyMessage)));
        assert!(matches!(
            check_line("PRIVMSG #c :hi\r\nQUIT"),
            Err(ClientError::IllegalLineBreak)
        ));
        assert!(matches!(
            check_line(&"x".repeat(513)),
            Err(ClientError::MessageTooLong { len: 513, max: 512 })
        ));
        assert!(check_line(&"x".repeat(512)).is_ok());
    }

    #[test]
    fn test_send_requires_connection() {
        let client = client();
        assert!(matches!(client.send("PING"), Err(ClientError::NotConnected)));
    }

    #[tokio::test]
    async fn test_send_async_requires_connection() {
        let client = client();
        assert!(matches!(
            client.send_async("PING").await,
            Err(ClientError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_disconnect_when_not_connected() {
        let client = client();
        assert!(!client.disconnect().await);
        assert_eq!(client.state(), ConnectionState::Disconnected);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ClientConfig::new("h", 6667, "n", "t").unwrap();
        config.host.clear();
        assert!(matches!(IrcClient::new(config), Err(ConfigError::EmptyHost)));
    }

    #[test]
    fn test_handler_management() {
        let client = client();
        assert!(client.remove_handler("PRIVMSG"));
        assert!(!client.with_handlers(|table| table.contains("PRIVMSG")));

        client.set_handler("CUSTOM", |_, _| {});
        assert!(client.with_handlers(|table| table.contains("CUSTOM")));

        client.reset_handlers();
        assert!(client.with_handlers(|table| table.contains("PRIVMSG") && !table.contains("CUSTOM")));
    }
}
