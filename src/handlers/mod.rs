//! Command dispatch.
//!
//! Two registries map upper-cased command names to handlers: one for
//! messages arriving from the server, one for `/commands` typed by the user.
//! Commands without a registered handler fall through to a passthrough
//! handler, so the handler set is explicit and each one testable on its own.
//!
//! Handlers run with the session lock held and must not block.

mod incoming;
mod outgoing;

pub use incoming::{
    IncomingRegistry, JoinHandler, NickHandler, NickInUseHandler, PingHandler, PrivmsgHandler,
    WelcomeHandler, passthrough,
};
pub use outgoing::{
    BufferHandler, BuffersHandler, MsgHandler, OutgoingNickHandler, OutgoingRegistry,
    QuitHandler, send_passthrough,
};

use slirc_proto::Message;

use crate::error::HandlerResult;
use crate::state::SessionState;

/// Reacts to one kind of server message.
pub trait IncomingHandler: Send + Sync {
    fn handle(&self, state: &mut SessionState, msg: &Message);
}

/// Executes one user command.
///
/// `command` is the name as typed (without the `/`), `args` everything after
/// the first space.
pub trait CommandHandler: Send + Sync {
    fn handle(&self, state: &mut SessionState, command: &str, args: &str) -> HandlerResult;
}
