//! Socket setup and line framing.
//!
//! [`open`] connects over TCP, enables keepalive, and wraps the socket in
//! TLS when the port is one of [`SECURE_PORTS`]. The resulting
//! [`TransportStream`] is split into halves driven by the client's reader
//! and writer tasks through [`LineCodec`].

pub mod codec;
pub mod tls;

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tracing::{debug, warn};

use crate::error::ClientError;

pub use self::codec::LineCodec;

/// Longest line we send, CRLF excluded.
pub const MAX_LINE_LEN: usize = 512;

/// Longest line we accept. Twitch tag blocks push lines far past 512.
pub const MAX_INCOMING_LINE_LEN: usize = 8191;

/// Ports on which the connection is wrapped in TLS.
pub const SECURE_PORTS: [u16; 2] = [443, 6697];

pub fn is_secure_port(port: u16) -> bool {
    SECURE_PORTS.contains(&port)
}

/// A plain or TLS connection.
#[allow(clippy::large_enum_variant)]
pub enum TransportStream {
    Tcp(TcpStream),
    Tls(Box<TlsStream<TcpStream>>),
}

impl TransportStream {
    pub fn is_tls(&self) -> bool {
        matches!(self, Self::Tls(_))
    }
}

impl std::fmt::Debug for TransportStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Tcp(_) => f.write_str("TransportStream::Tcp"),
            Self::Tls(_) => f.write_str("TransportStream::Tls"),
        }
    }
}

/// Connect to `host:port`, with TLS on secure ports.
pub async fn open(host: &str, port: u16) -> Result<TransportStream, ClientError> {
    let stream = TcpStream::connect((host, port)).await?;
    if let Err(e) = enable_keepalive(&stream) {
        warn!("failed to enable TCP keepalive: {}", e);
    }
    debug!(host, port, "tcp connected");

    if is_secure_port(port) {
        let stream = tls::handshake(host, stream).await?;
        Ok(TransportStream::Tls(Box::new(stream)))
    } else {
        Ok(TransportStream::Tcp(stream))
    }
}

fn enable_keepalive(stream: &TcpStream) -> io::Result<()> {
    use socket2::{SockRef, TcpKeepalive};

    let sock = SockRef::from(stream);
    let keepalive = TcpKeepalive::new()
        .with_time(Duration::from_secs(120))
        .with_interval(Duration::from_secs(30));
    sock.set_tcp_keepalive(&keepalive)
}

impl AsyncRead for TransportStream {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Tcp(s) => Pin::new(s).poll_read(cx, buf),
            Self::Tls(s) => Pin::new(s.as_mut()).poll_read(cx, buf),
        }
    }
}

impl AsyncWrite for TransportStream {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            Self::Tcp(s) => Pin::new(s).poll_write(cx, buf),
            Self::Tls(s) => Pin::new(s.as_mut()).poll_write(cx, buf),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Tcp(s) => Pin::new(s).poll_flush(cx),
            Self::Tls(s) => Pin::new(s.as_mut()).poll_flush(cx),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            Self::Tcp(s) => Pin::new(s).poll_shutdown(cx),
            Self::Tls(s) => Pin::new(s.as_mut()).poll_shutdown(cx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_ports() {
        assert!(is_secure_port(6697));
        assert!(is_secure_port(443));
        assert!(!is_secure_port(6667));
        assert!(!is_secure_port(80));
    }

    #[tokio::test]
    async fn test_open_plain() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let accept = tokio::spawn(async move { listener.accept().await.unwrap() });

        let stream = open("127.0.0.1", port).await.unwrap();
        assert!(!stream.is_tls());
        accept.await.unwrap();
    }

    #[tokio::test]
    async fn test_open_refused() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = open("127.0.0.1", port).await.unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
