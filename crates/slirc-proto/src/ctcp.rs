//! CTCP bodies carried inside `PRIVMSG` and `NOTICE`.
//!
//! A CTCP body is wrapped in `\x01`: `\x01ACTION waves\x01`. Some clients
//! omit the closing delimiter, so it is optional when parsing.
//!
//! ```
//! use slirc_proto::ctcp::{Ctcp, CtcpKind};
//!
//! let ctcp = Ctcp::parse("\x01ACTION waves hello\x01").unwrap();
//! assert_eq!(ctcp.kind, CtcpKind::Action);
//! assert_eq!(ctcp.params, Some("waves hello"));
//!
//! assert_eq!(Ctcp::action("dances").to_string(), "\x01ACTION dances\x01");
//! ```

use std::fmt;

/// The CTCP delimiter character (`\x01`).
pub const CTCP_DELIM: char = '\x01';

/// CTCP command kinds the client tells apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum CtcpKind {
    /// `/me` style action.
    Action,
    /// Client version request or reply.
    Version,
    /// Latency probe request or reply.
    Ping,
    /// Anything else, name as received.
    Other(String),
}

impl CtcpKind {
    /// Classify a CTCP command name, case-insensitively.
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "ACTION" => Self::Action,
            "VERSION" => Self::Version,
            "PING" => Self::Ping,
            _ => Self::Other(name.to_owned()),
        }
    }

    /// Canonical name as written on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Action => "ACTION",
            Self::Version => "VERSION",
            Self::Ping => "PING",
            Self::Other(name) => name,
        }
    }
}

impl fmt::Display for CtcpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A CTCP body borrowed from a message parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ctcp<'a> {
    /// The command.
    pub kind: CtcpKind,
    /// Text after the command, `None` when there is none.
    pub params: Option<&'a str>,
}

impl<'a> Ctcp<'a> {
    /// Parse a `PRIVMSG`/`NOTICE` body. `None` if it is not CTCP.
    pub fn parse(text: &'a str) -> Option<Self> {
        let body = text.strip_prefix(CTCP_DELIM)?;
        let body = body.strip_suffix(CTCP_DELIM).unwrap_or(body);
        if body.is_empty() {
            return None;
        }

        let (command, params) = match body.split_once(' ') {
            Some((command, params)) => (command, Some(params).filter(|p| !p.is_empty())),
            None => (body, None),
        };
        Some(Self {
            kind: CtcpKind::parse(command),
            params,
        })
    }

    /// Whether a message body is CTCP at all.
    #[inline]
    pub fn is_ctcp(text: &str) -> bool {
        text.starts_with(CTCP_DELIM)
    }

    /// An `ACTION` carrying `text`.
    pub fn action(text: &'a str) -> Self {
        Self {
            kind: CtcpKind::Action,
            params: Some(text),
        }
    }
}

impl fmt::Display for Ctcp<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{CTCP_DELIM}{}", self.kind)?;
        if let Some(params) = self.params {
            write!(f, " {params}")?;
        }
        write!(f, "{CTCP_DELIM}")
    }
}
