//! Input loop.

use std::io::{self, BufRead, BufReader};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::handlers::OutgoingRegistry;
use crate::state::Session;

/// Read lines from `reader` on a dedicated thread.
///
/// The channel closes when the reader hits EOF or fails. Blocking terminal
/// reads stay off the runtime this way.
pub fn spawn_line_reader<R>(reader: R) -> mpsc::UnboundedReceiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    thread::spawn(move || {
        for line in reader.lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    warn!(error = %e, "Failed to read input");
                    break;
                }
            }
        }
    });
    rx
}

/// [`spawn_line_reader`] over standard input.
pub fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    spawn_line_reader(BufReader::new(io::stdin()))
}

/// Feed user lines to the outgoing dispatcher until shutdown.
///
/// Waits at most `poll` between shutdown checks. End of input counts as
/// `/quit`.
pub async fn run_input_loop(
    session: Arc<Session>,
    mut lines: mpsc::UnboundedReceiver<String>,
    registry: Arc<OutgoingRegistry>,
    poll: Duration,
) {
    while !session.is_shut_down() {
        match timeout(poll, lines.recv()).await {
            Ok(Some(line)) => session.with(|state| registry.dispatch(state, &line)),
            Ok(None) => {
                info!("Input closed, quitting");
                session.with(|state| registry.dispatch(state, "/quit"));
                break;
            }
            Err(_) => continue,
        }
    }
    debug!("Input loop finished");
}
