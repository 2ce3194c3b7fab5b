//! The reader task: frames, parses and dispatches incoming lines.

use std::io;
use std::sync::Arc;

use futures_util::StreamExt;
use tokio::io::ReadHalf;
use tokio::sync::{mpsc, oneshot};
use tokio_util::codec::FramedRead;
use tracing::{debug, trace, warn};

use crate::dispatch::{Context, NamesAccumulator};
use crate::event::Event;
use crate::message::Message;
use crate::state::{ConnectionState, Transition};
use crate::transport::{LineCodec, TransportStream};

use super::writer::Outgoing;
use super::Shared;

/// Read until shutdown, EOF or a read error.
///
/// Exiting drops the read half and `_stop_writer`, which tells the writer
/// to flush and shut the write half down, so the socket is released.
pub(crate) async fn run(
    shared: Arc<Shared>,
    read_half: ReadHalf<TransportStream>,
    outgoing: mpsc::UnboundedSender<Outgoing>,
    mut shutdown: oneshot::Receiver<()>,
    _stop_writer: oneshot::Sender<()>,
) {
    let mut frames = FramedRead::with_capacity(
        read_half,
        LineCodec::new(),
        shared.config.read_buffer_capacity,
    );
    let mut names = NamesAccumulator::default();

    let failure = loop {
        tokio::select! {
            _ = &mut shutdown => break None,
            frame = frames.next() => match frame {
                Some(Ok(line)) => process(&shared, &mut names, &outgoing, &line),
                Some(Err(e)) => break Some(e),
                None => {
                    break Some(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        "connection closed by server",
                    ))
                }
            },
        }
    };

    if let Some(err) = failure {
        report(&shared, err);
    }
    debug!("reader stopped");
}

fn report(shared: &Shared, err: io::Error) {
    match shared.state.current() {
        ConnectionState::Disconnecting | ConnectionState::Disconnected => {
            debug!(error = %err, "read ended during disconnect");
        }
        ConnectionState::Connecting => {
            warn!(error = %err, "connection lost before welcome");
            let _ = shared.state.apply(Transition::Abort);
            let _ = shared.events.send(Event::NetworkError(Arc::new(err)));
        }
        ConnectionState::Connected => {
            warn!(error = %err, "connection lost");
            let _ = shared.events.send(Event::NetworkError(Arc::new(err)));
        }
    }
}

/// Parse and dispatch one line. The handler is cloned out of the table so
/// the lock is not held while it runs.
fn process(
    shared: &Shared,
    names: &mut NamesAccumulator,
    outgoing: &mpsc::UnboundedSender<Outgoing>,
    line: &str,
) {
    trace!("<- {}", line.escape_debug());
    if line.is_empty() {
        return;
    }

    let message = Arc::new(Message::parse(line));
    let Some(handler) = shared.handlers.read().get(message.command()) else {
        trace!(command = message.command(), "no handler");
        return;
    };

    let mut ctx = Context::new(&shared.state, names, shared.config.auto_pong);
    handler(&mut ctx, &message);
    let (events, lines) = ctx.finish();

    for line in lines {
        if outgoing.send(Outgoing::new(line)).is_err() {
            debug!("writer gone, dropping handler reply");
        }
    }
    for event in events {
        if shared.events.send(event).is_err() {
            trace!("event receiver dropped");
        }
    }
}
