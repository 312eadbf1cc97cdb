//! Unified error handling for slircc.
//!
//! Handler errors never end a loop: they are rendered to the active buffer
//! and the loop carries on. Client errors are fatal to whatever produced them.

use thiserror::Error;

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur while handling a user command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    /// Arguments did not match the command's syntax. Carries the usage line.
    #[error("usage: {0}")]
    Usage(&'static str),

    /// Plain text was typed while the status buffer is active.
    #[error("not a chat buffer")]
    TargetUnavailable,
}

impl HandlerError {
    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::TargetUnavailable => "target_unavailable",
        }
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;

// ============================================================================
// Client Errors (startup and transport)
// ============================================================================

/// Errors that stop the client or its network loop.
///
/// Configuration problems are reported by [`crate::config::ConfigError`]
/// before a client exists, so they have no variant here.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid server name: {0}")]
    InvalidServerName(String),

    #[error("tls error: {0}")]
    Tls(String),

    #[error("connection closed by server")]
    ConnectionClosed,

    #[error("task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<slirc_proto::ProtocolError> for ClientError {
    fn from(err: slirc_proto::ProtocolError) -> Self {
        match err {
            slirc_proto::ProtocolError::Io(e) => Self::Io(e),
            other => Self::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, other)),
        }
    }
}
