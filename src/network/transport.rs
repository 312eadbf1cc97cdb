//! Connection setup: TCP, optionally upgraded to TLS.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;
use tokio_rustls::client::TlsStream;
use tokio_rustls::rustls::pki_types::ServerName;
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::error::ClientError;

/// A bidirectional byte stream to the server.
pub trait Connection: AsyncRead + AsyncWrite + Unpin + Send {}

impl<T> Connection for T where T: AsyncRead + AsyncWrite + Unpin + Send {}

/// Type-erased connection, plain or TLS.
pub type BoxedConnection = Box<dyn Connection>;

/// Open the connection described by `server`.
pub async fn connect(server: &ServerConfig) -> Result<BoxedConnection, ClientError> {
    info!(host = %server.host, port = server.port, tls = server.tls, "Connecting");

    let tcp = TcpStream::connect((server.host.as_str(), server.port)).await?;
    tcp.set_nodelay(true)?;

    if !server.tls {
        return Ok(Box::new(tcp));
    }

    let tls = upgrade_to_tls(tcp, &server.host).await?;
    info!(host = %server.host, "TLS established");
    Ok(Box::new(tls))
}

fn native_roots() -> RootCertStore {
    let mut roots = RootCertStore::empty();
    let certs = rustls_native_certs::load_native_certs();
    for cert in certs.certs {
        if let Err(e) = roots.add(cert) {
            warn!("Failed to add root cert: {}", e);
        }
    }
    for e in &certs.errors {
        warn!("Error loading native certs: {}", e);
    }
    if roots.is_empty() {
        warn!("No trusted root certificates found, TLS handshakes will fail");
    }
    roots
}

/// Upgrade a TCP stream to TLS, verifying `hostname` against the system
/// trust store.
pub async fn upgrade_to_tls(
    tcp_stream: TcpStream,
    hostname: &str,
) -> Result<TlsStream<TcpStream>, ClientError> {
    let config = ClientConfig::builder()
        .with_root_certificates(native_roots())
        .with_no_client_auth();

    let connector = TlsConnector::from(Arc::new(config));
    let server_name = ServerName::try_from(hostname.to_owned())
        .map_err(|_| ClientError::InvalidServerName(hostname.to_owned()))?;

    connector
        .connect(server_name, tcp_stream)
        .await
        .map_err(|e| ClientError::Tls(e.to_string()))
}
