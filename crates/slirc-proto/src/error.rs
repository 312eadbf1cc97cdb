//! Error types for the IRC protocol library.
//!
//! Decode failures are recoverable: the caller drops the offending line and
//! keeps reading. Encode never fails at runtime, oversized lines are
//! truncated instead.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error while reading from or writing to the transport.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A received line could not be turned into a [`Message`](crate::Message).
    #[error("malformed message {line:?}: {cause}")]
    MalformedMessage {
        /// The line as far as it could be decoded.
        line: String,
        /// Why it was rejected.
        #[source]
        cause: MessageParseError,
    },

    /// A received line was longer than the codec allows. It is discarded
    /// up to and including its terminator.
    #[error("message too long: {actual} bytes (limit: {limit})")]
    MessageTooLong {
        /// Bytes seen before the line was given up on.
        actual: usize,
        /// Maximum allowed length, terminator included.
        limit: usize,
    },
}

impl ProtocolError {
    /// Whether this error only concerns a single line and reading may go on.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::MalformedMessage { .. } | Self::MessageTooLong { .. }
        )
    }
}

/// Errors encountered when parsing IRC messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum MessageParseError {
    /// Message was empty.
    #[error("empty message")]
    EmptyMessage,

    /// NUL, CR or LF inside a line that was already framed.
    #[error("illegal control character: {0:?}")]
    IllegalControlChar(char),

    /// The line carried a source but no command token.
    #[error("missing command")]
    MissingCommand,
}
