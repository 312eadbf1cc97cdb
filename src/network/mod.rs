//! Network loop.
//!
//! The loop is the only owner of the transport. It reads framed lines and
//! feeds them to the incoming dispatcher, and writes whatever the session
//! has queued for the server. Transport failure or EOF ends it and shuts
//! the whole client down.

mod transport;

pub use transport::{BoxedConnection, Connection, connect, upgrade_to_tls};

use std::sync::Arc;

use futures_util::SinkExt;
use slirc_proto::{Framer, IrcCodec, Message};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tokio_util::codec::FramedWrite;
use tracing::{debug, info, warn};

use crate::error::ClientError;
use crate::handlers::IncomingRegistry;
use crate::state::Session;

/// Run the network loop over `stream` until shutdown or transport failure.
///
/// Messages still queued when shutdown is observed (typically a `QUIT`) are
/// written before the stream is closed.
pub async fn run_network_loop<S>(
    session: Arc<Session>,
    stream: S,
    mut outbound: mpsc::UnboundedReceiver<Message>,
    registry: Arc<IncomingRegistry>,
) -> Result<(), ClientError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, writer) = tokio::io::split(stream);
    let mut framer = Framer::new(reader);
    let mut sink = FramedWrite::new(writer, IrcCodec);
    let shutdown = session.shutdown_token();

    let result = loop {
        tokio::select! {
            biased;

            _ = shutdown.cancelled() => break Ok(()),

            Some(msg) = outbound.recv() => {
                debug!(command = %msg.command_name(), "Sending message");
                if let Err(e) = sink.send(msg).await {
                    warn!(error = %e, "Write error");
                    break Err(e.into());
                }
            }

            frame = framer.next_message() => match frame {
                Ok(Some(Ok(msg))) => session.with(|state| registry.dispatch(state, &msg)),
                Ok(Some(Err(e))) => warn!(error = %e, "Discarding unusable line"),
                Ok(None) => {
                    info!("Server closed the connection");
                    break Err(ClientError::ConnectionClosed);
                }
                Err(e) => {
                    warn!(error = %e, "Read error");
                    break Err(e.into());
                }
            },
        }
    };

    while let Ok(msg) = outbound.try_recv() {
        if sink.feed(msg).await.is_err() {
            break;
        }
    }
    if let Err(e) = sink.close().await {
        debug!(error = %e, "Error closing connection");
    }

    session.shut_down();
    debug!("Network loop finished");
    result
}
