//! # slirc-proto
//!
//! The protocol half of the slircc client: parsing and serializing IRC
//! lines, framing a byte stream into lines, and deciding which conversation
//! buffer an inbound message belongs to.
//!
//! ## Features
//!
//! - Lenient decoding (undecodable bytes are dropped, not fatal)
//! - Encoding with 512-byte truncation
//! - Newline framing tolerant of `\r\n`, bare `\n` and blank lines
//! - Per-command buffer target classification
//! - CTCP body parsing (`ACTION` and friends)
//! - Optional Tokio integration (`tokio` feature, on by default)
//!
//! ## Quick Start
//!
//! ```rust
//! use slirc_proto::Message;
//!
//! let msg: Message = ":nick!user@host PRIVMSG #channel :Hello!".parse().unwrap();
//! let route = msg.route();
//! assert_eq!(route.target.as_deref(), Some("#channel"));
//! assert_eq!(route.params, vec!["Hello!"]);
//!
//! let reply = Message::privmsg("#channel", "hi back");
//! assert_eq!(reply.encode(), b"PRIVMSG #channel :hi back\r\n");
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod chan;
pub mod ctcp;
pub mod error;
#[cfg(feature = "tokio")]
pub mod framer;
#[cfg(feature = "tokio")]
pub mod irc;
#[cfg(feature = "tokio")]
pub mod line;
pub mod message;
pub mod target;

pub use self::chan::{ChannelExt, CHANNEL_PREFIXES};
pub use self::ctcp::{Ctcp, CtcpKind};
pub use self::error::{MessageParseError, ProtocolError};
pub use self::message::{Message, MAX_LINE_LEN};
pub use self::target::{pop_channel, Route};

#[cfg(feature = "tokio")]
pub use self::framer::Framer;
#[cfg(feature = "tokio")]
pub use self::irc::IrcCodec;
#[cfg(feature = "tokio")]
pub use self::line::LineCodec;
