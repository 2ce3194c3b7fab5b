//! Client-side TLS with the bundled webpki root store.

use std::sync::Arc;

use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::error::ClientError;

/// Connector that validates server certificates against the Mozilla roots
/// shipped in `webpki-roots`.
pub fn connector() -> TlsConnector {
    let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let config = ClientConfig::builder()
        .with_root_certificates(roots)
        .with_no_client_auth();
    TlsConnector::from(Arc::new(config))
}

/// Run the TLS handshake over `stream`, verifying the certificate for `host`.
pub async fn handshake(host: &str, stream: TcpStream) -> Result<TlsStream<TcpStream>, ClientError> {
    let server_name = ServerName::try_from(host.to_owned())
        .map_err(|_| ClientError::InvalidServerName(host.to_owned()))?;
    let stream = connector().connect(server_name, stream).await?;
    debug!(host, "tls handshake complete");
    Ok(stream)
}
