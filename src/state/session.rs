//! Session state shared by the network, input and display loops.
//!
//! ## Locking
//!
//! Everything mutable sits behind one `parking_lot::Mutex`. It is the only
//! lock in the client, it is never held across an `.await`, and display
//! events are queued while it is held so queue order matches append order.
//! The shutdown flag is a `CancellationToken` outside the lock so loops can
//! poll or await it without contending.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use slirc_proto::{Message, Route};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::buffer::{Buffer, BufferMessage, BufferName};
use crate::ui::DisplayEvent;

/// Receiving ends handed to the network and display loops.
pub struct SessionChannels {
    /// Messages waiting to be written to the server.
    pub outbound: mpsc::UnboundedReceiver<Message>,
    /// Rendering events for the display loop.
    pub display: mpsc::UnboundedReceiver<DisplayEvent>,
}

/// Shared handle to the client state.
pub struct Session {
    state: Mutex<SessionState>,
    shutdown: CancellationToken,
}

impl Session {
    /// Create a session for `default_nick`, plus the queues it feeds.
    pub fn new(default_nick: impl Into<String>) -> (Arc<Self>, SessionChannels) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (display_tx, display_rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();
        let default_nick = default_nick.into();

        let state = SessionState {
            current_nick: default_nick.clone(),
            default_nick,
            nick_attempt_count: 0,
            current_buffer: None,
            buffers: HashMap::from([(None, Buffer::new())]),
            outbound_tx,
            display_tx,
            shutdown: shutdown.clone(),
        };

        let session = Arc::new(Self {
            state: Mutex::new(state),
            shutdown,
        });
        let channels = SessionChannels {
            outbound: outbound_rx,
            display: display_rx,
        };
        (session, channels)
    }

    /// Run `f` with the state locked.
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut self.state.lock())
    }

    /// Send NICK and USER to start registration.
    pub fn register(&self, username: &str, realname: &str) {
        self.with(|state| {
            let nick = state.default_nick.clone();
            state.send_with_echo(Message::nick(nick));
            state.send_with_echo(Message::user(username, realname));
        });
    }

    /// Set the shutdown flag. Setting it again has no further effect.
    pub fn shut_down(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Token that completes once the shutdown flag is set.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}

/// The mutable part of the session. Only reachable through [`Session::with`].
pub struct SessionState {
    default_nick: String,
    current_nick: String,
    nick_attempt_count: u32,
    current_buffer: BufferName,
    buffers: HashMap<BufferName, Buffer>,
    outbound_tx: mpsc::UnboundedSender<Message>,
    display_tx: mpsc::UnboundedSender<DisplayEvent>,
    shutdown: CancellationToken,
}

impl SessionState {
    pub fn default_nick(&self) -> &str {
        &self.default_nick
    }

    pub fn current_nick(&self) -> &str {
        &self.current_nick
    }

    pub fn nick_attempt_count(&self) -> u32 {
        self.nick_attempt_count
    }

    /// Buffer shown to the user. `None` is the status buffer.
    pub fn current_buffer(&self) -> Option<&str> {
        self.current_buffer.as_deref()
    }

    /// Replace the requested nick and restart collision numbering.
    pub fn set_default_nick(&mut self, nick: impl Into<String>) {
        self.default_nick = nick.into();
        self.nick_attempt_count = 0;
    }

    /// Record the nick the server knows us by.
    pub fn set_current_nick(&mut self, nick: impl Into<String>) {
        self.current_nick = nick.into();
    }

    /// Advance to the next collision nick (`default_nick` + counter) and
    /// return it.
    pub fn next_nick_attempt(&mut self) -> String {
        self.nick_attempt_count += 1;
        self.current_nick = format!("{}{}", self.default_nick, self.nick_attempt_count);
        self.current_nick.clone()
    }

    /// Append a line to `buffer`, creating the buffer on first use.
    pub fn append(&mut self, buffer: BufferName, message: BufferMessage) {
        let seq = self
            .buffers
            .entry(buffer.clone())
            .or_default()
            .push(message.clone());
        let _ = self.display_tx.send(DisplayEvent::Append {
            buffer,
            seq,
            message,
        });
    }

    /// Append a line to the active buffer.
    pub fn display(&mut self, message: BufferMessage) {
        let buffer = self.current_buffer.clone();
        self.append(buffer, message);
    }

    pub fn display_error(&mut self, text: impl Into<String>) {
        self.display(BufferMessage::error(text));
    }

    pub fn display_info(&mut self, text: impl Into<String>) {
        self.display(BufferMessage::info(text));
    }

    /// Make `buffer` the active one and ask the display to redraw it.
    pub fn switch_buffer(&mut self, buffer: BufferName) {
        debug!(buffer = ?buffer, "Switching buffer");
        self.buffers.entry(buffer.clone()).or_default();
        self.current_buffer = buffer.clone();
        let _ = self.display_tx.send(DisplayEvent::Switch(buffer));
    }

    /// Names of all known buffers except the status buffer, sorted.
    pub fn buffer_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.buffers.keys().flatten().cloned().collect();
        names.sort();
        names
    }

    pub fn buffer(&self, name: &BufferName) -> Option<&Buffer> {
        self.buffers.get(name)
    }

    /// Copy of a buffer's lines and the sequence number of the newest one.
    pub fn backlog(&self, name: &BufferName) -> (Vec<BufferMessage>, u64) {
        self.buffers
            .get(name)
            .map(|buffer| (buffer.iter().cloned().collect(), buffer.last_seq()))
            .unwrap_or_default()
    }

    /// Queue a message for the server without echoing it.
    pub fn send(&mut self, msg: Message) {
        if self.outbound_tx.send(msg).is_err() {
            debug!("Network loop gone, dropping outgoing message");
        }
    }

    /// Queue a message for the server and echo it into the buffer it
    /// concerns.
    pub fn send_with_echo(&mut self, msg: Message) {
        let Route { target, params } = msg.route();
        let mut content = msg.command_name();
        for param in &params {
            content.push(' ');
            content.push_str(param);
        }
        self.append(target, BufferMessage::outgoing(content));
        self.send(msg);
    }

    /// Set the shutdown flag.
    pub fn shut_down(&self) {
        if !self.shutdown.is_cancelled() {
            info!("Shutting down");
        }
        self.shutdown.cancel();
    }
}
