//! Conversation buffers.
//!
//! A buffer is a FIFO ring of the last [`BACKLOG_CAPACITY`] lines shown in
//! one conversation. Each appended line gets a sequence number that keeps
//! counting past evictions, so the display can tell replayed lines from new
//! ones.

use std::collections::VecDeque;

/// Lines kept per buffer. The oldest line is evicted first.
pub const BACKLOG_CAPACITY: usize = 100;

/// Name of a buffer. `None` is the status buffer.
pub type BufferName = Option<String>;

/// Marker shown in front of lines without an author.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    /// Sent by us.
    Outgoing,
    /// Received from the server.
    Incoming,
    /// Local error.
    Error,
    /// Informational or chat text.
    Plain,
}

impl Marker {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outgoing => "<--",
            Self::Incoming => "-->",
            Self::Error => "!",
            Self::Plain => "",
        }
    }
}

/// One displayed line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferMessage {
    /// Who said it. `None` for status lines.
    pub author: Option<String>,
    pub content: String,
    pub prefix: Marker,
    /// A CTCP `ACTION`, shown as `* author content`.
    pub action: bool,
}

impl BufferMessage {
    pub fn new(author: Option<String>, content: impl Into<String>, prefix: Marker) -> Self {
        Self {
            author,
            content: content.into(),
            prefix,
            action: false,
        }
    }

    /// A line received from the server.
    pub fn incoming(author: Option<String>, content: impl Into<String>) -> Self {
        Self::new(author, content, Marker::Incoming)
    }

    /// Echo of a line we sent.
    pub fn outgoing(content: impl Into<String>) -> Self {
        Self::new(None, content, Marker::Outgoing)
    }

    /// Chat text from `author`.
    pub fn chat(author: Option<String>, content: impl Into<String>) -> Self {
        Self::new(author, content, Marker::Plain)
    }

    /// `/me` text from `author`.
    pub fn action(author: Option<String>, content: impl Into<String>) -> Self {
        Self {
            action: true,
            ..Self::chat(author, content)
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(None, content, Marker::Error)
    }

    pub fn info(content: impl Into<String>) -> Self {
        Self::new(None, content, Marker::Plain)
    }
}

/// Bounded backlog of one conversation.
#[derive(Debug, Default)]
pub struct Buffer {
    messages: VecDeque<BufferMessage>,
    appended: u64,
}

impl Buffer {
    pub fn new() -> Self {
        Self {
            messages: VecDeque::with_capacity(BACKLOG_CAPACITY),
            appended: 0,
        }
    }

    /// Append a line, evicting the oldest one when full. Returns the line's
    /// sequence number (1 for the first line ever appended).
    pub fn push(&mut self, message: BufferMessage) -> u64 {
        if self.messages.len() == BACKLOG_CAPACITY {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
        self.appended += 1;
        self.appended
    }

    /// Sequence number of the newest line, 0 if nothing was appended yet.
    pub fn last_seq(&self) -> u64 {
        self.appended
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Lines oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &BufferMessage> {
        self.messages.iter()
    }
}
