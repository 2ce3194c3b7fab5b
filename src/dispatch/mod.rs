//! Command dispatch.
//!
//! A [`DispatchTable`] maps a command token (`PRIVMSG`, `001`, ...) to a
//! [`Handler`]. Lookup is exact and case-sensitive; a command with no
//! handler is dropped without an event.
//!
//! Handlers never touch the socket. They push events and outgoing lines
//! into a [`Context`], which the reader drains after each line, so a
//! handler cannot block the read loop.
//!
//! ```
//! use std::sync::Arc;
//! use slirc_tmi::dispatch::{Context, DispatchTable, NamesAccumulator};
//! use slirc_tmi::event::Event;
//! use slirc_tmi::state::StateMachine;
//! use slirc_tmi::Message;
//!
//! let table = DispatchTable::new();
//! let state = StateMachine::new();
//! let mut names = NamesAccumulator::default();
//! let mut ctx = Context::new(&state, &mut names, true);
//!
//! table.dispatch(&mut ctx, &Arc::new(Message::parse("PING :tmi.twitch.tv")));
//!
//! let (events, outgoing) = ctx.finish();
//! assert!(matches!(events[0], Event::Ping(_)));
//! assert_eq!(outgoing, vec!["PONG :tmi.twitch.tv".to_owned()]);
//! ```

mod handlers;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::event::Event;
use crate::message::Message;
use crate::state::StateMachine;

/// A command handler.
pub type Handler = Arc<dyn Fn(&mut Context<'_>, &Arc<Message>) + Send + Sync>;

/// Channel to nicks, filled by `353` and drained by `366`.
#[derive(Debug, Default)]
pub struct NamesAccumulator {
    pending: HashMap<String, Vec<String>>,
}

impl NamesAccumulator {
    /// Append nicks to the in-progress list for `channel`.
    pub fn extend<I>(&mut self, channel: &str, nicks: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.pending
            .entry(channel.to_owned())
            .or_default()
            .extend(nicks.into_iter().map(Into::into));
    }

    /// Take the finished list for `channel`, removing its entry.
    pub fn finish(&mut self, channel: &str) -> Vec<String> {
        self.pending.remove(channel).unwrap_or_default()
    }

    /// Number of channels with a listing in flight.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

/// What a handler may do while processing one line.
pub struct Context<'a> {
    state: &'a StateMachine,
    names: &'a mut NamesAccumulator,
    auto_pong: bool,
    events: Vec<Event>,
    outgoing: Vec<String>,
}

impl<'a> Context<'a> {
    pub fn new(state: &'a StateMachine, names: &'a mut NamesAccumulator, auto_pong: bool) -> Self {
        Self {
            state,
            names,
            auto_pong,
            events: Vec::new(),
            outgoing: Vec::new(),
        }
    }

    /// Raise an event. Events are delivered in the order they are raised.
    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Queue a line to send once the handler returns.
    pub fn send(&mut self, line: impl Into<String>) {
        self.outgoing.push(line.into());
    }

    pub fn state(&self) -> &StateMachine {
        self.state
    }

    pub fn names(&mut self) -> &mut NamesAccumulator {
        self.names
    }

    /// Whether `PING` should be answered automatically.
    pub fn auto_pong(&self) -> bool {
        self.auto_pong
    }

    /// Raised events and queued lines, in order.
    pub fn finish(self) -> (Vec<Event>, Vec<String>) {
        (self.events, self.outgoing)
    }
}

/// Command to handler table.
#[derive(Clone)]
pub struct DispatchTable {
    handlers: HashMap<String, Handler>,
}

impl DispatchTable {
    /// A table holding the default handlers.
    pub fn new() -> Self {
        let mut table = Self::empty();
        table.reset();
        table
    }

    /// A table with no handlers at all.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Drop every handler and install the defaults.
    pub fn reset(&mut self) {
        self.handlers.clear();
        handlers::install(self);
    }

    /// Install or replace the handler for `command`.
    ///
    /// # Panics
    ///
    /// Panics if `command` is empty; no parsed line can carry an empty
    /// command, so such a handler would be a caller bug.
    pub fn set<F>(&mut self, command: &str, handler: F)
    where
        F: Fn(&mut Context<'_>, &Arc<Message>) + Send + Sync + 'static,
    {
        assert!(!command.is_empty(), "handler command must not be empty");
        self.handlers.insert(command.to_owned(), Arc::new(handler));
    }

    /// Remove the handler for `command`, returning whether one existed.
    pub fn remove(&mut self, command: &str) -> bool {
        self.handlers.remove(command).is_some()
    }

    pub fn get(&self, command: &str) -> Option<Handler> {
        self.handlers.get(command).cloned()
    }

    pub fn contains(&self, command: &str) -> bool {
        self.handlers.contains_key(command)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run the handler for `message`'s command. Returns `false` when there
    /// is none.
    pub fn dispatch(&self, ctx: &mut Context<'_>, message: &Arc<Message>) -> bool {
        match self.get(message.command()) {
            Some(handler) => {
                handler(ctx, message);
                true
            }
            None => {
                trace!(command = message.command(), "no handler");
                false
            }
        }
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut commands: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        commands.sort_unstable();
        f.debug_struct("DispatchTable")
            .field("commands", &commands)
            .finish()
    }
}
