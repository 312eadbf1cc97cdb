//! Display loop and renderers.

use std::io::{self, Stdout, Write};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::DisplayEvent;
use super::format::irc_to_ansi;
use crate::state::{BufferMessage, BufferName, Session};

/// Output side of the display loop.
pub trait Renderer: Send {
    /// Wipe whatever is on screen.
    fn clear(&mut self) -> io::Result<()>;

    /// Draw one line.
    fn render(&mut self, message: &BufferMessage) -> io::Result<()>;
}

/// Renders to a terminal using ANSI escapes.
pub struct TerminalRenderer<W: Write = Stdout> {
    out: W,
}

impl TerminalRenderer<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn clear(&mut self) -> io::Result<()> {
        self.out.write_all(b"\x1b[2J\x1b[H")?;
        self.out.flush()
    }

    fn render(&mut self, message: &BufferMessage) -> io::Result<()> {
        let content = irc_to_ansi(&message.content);
        match &message.author {
            Some(author) if message.action => writeln!(self.out, "\r* {author} {content}")?,
            Some(author) => writeln!(self.out, "\r<{author}> {content}")?,
            None => writeln!(self.out, "\r{} {content}", message.prefix.as_str())?,
        }
        self.out.flush()
    }
}

/// Render display events until shutdown. Returns the renderer.
///
/// Only lines for the active buffer are drawn. On a switch the screen is
/// cleared and the buffer's backlog replayed. Appends already covered by that
/// replay are skipped by sequence number.
pub async fn run_display_loop<R: Renderer>(
    session: Arc<Session>,
    mut events: mpsc::UnboundedReceiver<DisplayEvent>,
    mut renderer: R,
    poll: Duration,
) -> R {
    let mut shown: BufferName = session.with(|state| state.current_buffer().map(str::to_owned));
    let mut replayed_upto = 0;

    while !session.is_shut_down() {
        let event = match timeout(poll, events.recv()).await {
            Ok(Some(event)) => event,
            Ok(None) => break,
            Err(_) => continue,
        };

        match event {
            DisplayEvent::Switch(buffer) => {
                let (backlog, last_seq) = session.with(|state| state.backlog(&buffer));
                debug!(buffer = ?buffer, lines = backlog.len(), "Replaying buffer");
                if let Err(e) = renderer.clear() {
                    warn!(error = %e, "Failed to clear display");
                }
                for message in &backlog {
                    if let Err(e) = renderer.render(message) {
                        warn!(error = %e, "Failed to render line");
                    }
                }
                shown = buffer;
                replayed_upto = last_seq;
            }
            DisplayEvent::Append {
                buffer,
                seq,
                message,
            } => {
                if buffer != shown || seq <= replayed_upto {
                    continue;
                }
                if let Err(e) = renderer.render(&message) {
                    warn!(error = %e, "Failed to render line");
                }
            }
        }
    }

    debug!("Display loop finished");
    renderer
}
