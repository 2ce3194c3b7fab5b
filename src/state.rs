//! Connection lifecycle state machine.
//!
//! ```text
//! Disconnected --connect--> Connecting --welcome--> Connected
//!      ^                        |                       |
//!      +--------abort-----------+                  disconnect
//!      |                                                v
//!      +-----------------cleanup------------------ Disconnecting
//! ```
//!
//! Every check and write happens under one lock. An illegal transition is
//! logged and reported as `false`; the state is left untouched.
//!
//! # Example
//!
//! ```
//! use slirc_tmi::state::{ConnectionState, StateMachine, Transition};
//!
//! let machine = StateMachine::new();
//! assert!(machine.apply(Transition::Connect));
//! assert_eq!(machine.current(), ConnectionState::Connecting);
//!
//! // A second connect while connecting is rejected.
//! assert!(!machine.apply(Transition::Connect));
//! assert_eq!(machine.current(), ConnectionState::Connecting);
//! ```

use parking_lot::Mutex;
use tracing::{debug, warn};

/// Where a client is in its connection lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionState {
    /// No socket.
    #[default]
    Disconnected,
    /// Socket open, handshake sent, waiting for the welcome reply.
    Connecting,
    /// Welcome (001) received.
    Connected,
    /// Tearing the socket down.
    Disconnecting,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Disconnecting => "disconnecting",
        };
        f.write_str(name)
    }
}

/// A requested state change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Disconnected -> Connecting
    Connect,
    /// Connecting -> Connected, on the welcome reply
    Welcome,
    /// Connected -> Disconnecting
    Disconnect,
    /// Disconnecting -> Disconnected, once the stream is released
    Cleanup,
    /// Connecting -> Disconnected, when the socket failed to open or
    /// dropped before the welcome
    Abort,
}

impl Transition {
    /// The state this transition starts from.
    pub fn source(self) -> ConnectionState {
        match self {
            Self::Connect => ConnectionState::Disconnected,
            Self::Welcome | Self::Abort => ConnectionState::Connecting,
            Self::Disconnect => ConnectionState::Connected,
            Self::Cleanup => ConnectionState::Disconnecting,
        }
    }

    /// The state this transition leads to.
    pub fn target(self) -> ConnectionState {
        match self {
            Self::Connect => ConnectionState::Connecting,
            Self::Welcome => ConnectionState::Connected,
            Self::Disconnect => ConnectionState::Disconnecting,
            Self::Cleanup | Self::Abort => ConnectionState::Disconnected,
        }
    }
}

/// Lock-guarded [`ConnectionState`].
#[derive(Debug, Default)]
pub struct StateMachine {
    state: Mutex<ConnectionState>,
}

impl StateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current state.
    pub fn current(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Apply `transition` if the current state allows it.
    ///
    /// Returns `false`, leaving the state unchanged, when it does not.
    #[must_use]
    pub fn apply(&self, transition: Transition) -> bool {
        let mut state = self.state.lock();
        if *state != transition.source() {
            warn!(
                ?transition,
                current = %*state,
                "rejected illegal connection state transition"
            );
            return false;
        }
        debug!(from = %*state, to = %transition.target(), "connection state changed");
        *state = transition.target();
        true
    }

    /// Whether a reconnect may start now, and from which state.
    ///
    /// Reconnecting is allowed from [`Connected`](ConnectionState::Connected)
    /// and [`Disconnected`](ConnectionState::Disconnected), never while a
    /// connect or disconnect is in flight.
    pub fn reconnect_from(&self) -> Option<ConnectionState> {
        let state = self.state.lock();
        match *state {
            ConnectionState::Connected | ConnectionState::Disconnected => Some(*state),
            ConnectionState::Connecting | ConnectionState::Disconnecting => {
                warn!(current = %*state, "rejected reconnect while a transition is in flight");
                None
            }
        }
    }
}
