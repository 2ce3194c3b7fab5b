//! The writer task: the only code that writes to the socket.

use std::io;

use futures_util::SinkExt;
use tokio::io::WriteHalf;
use tokio::sync::{mpsc, oneshot};
use tokio_util::codec::FramedWrite;
use tracing::{debug, trace, warn};

use crate::transport::{LineCodec, TransportStream};

/// One queued line, with an optional channel for the write result.
#[derive(Debug)]
pub(crate) struct Outgoing {
    pub(crate) line: String,
    pub(crate) ack: Option<oneshot::Sender<io::Result<()>>>,
}

impl Outgoing {
    pub(crate) fn new(line: String) -> Self {
        Self { line, ack: None }
    }

    pub(crate) fn acked(line: String) -> (Self, oneshot::Receiver<io::Result<()>>) {
        let (tx, rx) = oneshot::channel();
        (Self { line, ack: Some(tx) }, rx)
    }
}

/// Write lines until every sender is gone, a write fails or the reader
/// stops, then shut the write half down.
///
/// Once `reader_done` fires the queue is closed; lines already queued are
/// still written before the shutdown.
pub(crate) async fn run(
    write_half: WriteHalf<TransportStream>,
    mut rx: mpsc::UnboundedReceiver<Outgoing>,
    mut reader_done: oneshot::Receiver<()>,
) {
    let mut sink = FramedWrite::new(write_half, LineCodec::new());
    let mut reader_running = true;

    loop {
        let next = tokio::select! {
            biased;
            next = rx.recv() => next,
            _ = &mut reader_done, if reader_running => {
                debug!("reader stopped, draining queue");
                reader_running = false;
                rx.close();
                continue;
            }
        };
        let Some(Outgoing { line, ack }) = next else {
            break;
        };

        log_line(&line);
        let result = sink.send(line).await;
        let failed = match &result {
            Ok(()) => false,
            Err(e) => {
                warn!(error = %e, "write failed");
                true
            }
        };
        if let Some(ack) = ack {
            let _ = ack.send(result);
        }
        if failed {
            break;
        }
    }

    if let Err(e) = SinkExt::<String>::close(&mut sink).await {
        debug!(error = %e, "error closing write half");
    }
    debug!("writer stopped");
}

fn log_line(line: &str) {
    if line.starts_with("PASS ") {
        trace!("-> PASS <redacted>");
    } else {
        trace!("-> {}", line.escape_debug());
    }
}
