//! Handlers for messages received from the server.

use std::collections::HashMap;

use slirc_proto::{Ctcp, CtcpKind, Message, Route};
use tracing::{debug, info};

use super::IncomingHandler;
use crate::state::{BufferMessage, SessionState};

/// Log a server message into the buffer it concerns.
///
/// The line reads `COMMAND params...` with the routing target removed. It
/// is attributed to the message source, except for numerics which are
/// server replies and carry no author.
pub fn passthrough(state: &mut SessionState, msg: &Message) {
    let Route { target, params } = msg.route();
    let mut content = msg.command_name();
    for param in &params {
        content.push(' ');
        content.push_str(param);
    }
    let author = if msg.is_numeric() {
        None
    } else {
        msg.source.clone()
    };
    state.append(target, BufferMessage::incoming(author, content));
}

/// Answers `PING` with `PONG`. The reply is not echoed.
pub struct PingHandler;

impl IncomingHandler for PingHandler {
    fn handle(&self, state: &mut SessionState, msg: &Message) {
        passthrough(state, msg);
        state.send(Message::pong(msg.params.last().map(String::as_str)));
    }
}

/// `433 ERR_NICKNAMEINUSE`: retry with the default nick plus a counter.
///
/// There is no retry limit.
pub struct NickInUseHandler;

impl IncomingHandler for NickInUseHandler {
    fn handle(&self, state: &mut SessionState, msg: &Message) {
        passthrough(state, msg);
        let nick = state.next_nick_attempt();
        info!(nick = %nick, attempt = state.nick_attempt_count(), "Nickname in use, retrying");
        state.send_with_echo(Message::nick(nick));
    }
}

/// `JOIN`: our own joins make the channel the active buffer.
pub struct JoinHandler;

impl IncomingHandler for JoinHandler {
    fn handle(&self, state: &mut SessionState, msg: &Message) {
        if let Some(channel) = msg.arg(0)
            && msg.source_nickname() == Some(state.current_nick())
        {
            state.switch_buffer(Some(channel.to_owned()));
        }
        passthrough(state, msg);
    }
}

/// `PRIVMSG`: shown as chat, in the sender's buffer when addressed to us.
pub struct PrivmsgHandler;

impl IncomingHandler for PrivmsgHandler {
    fn handle(&self, state: &mut SessionState, msg: &Message) {
        let (Some(target), Some(text)) = (msg.arg(0), msg.arg(1)) else {
            passthrough(state, msg);
            return;
        };
        let author = msg.source_nickname().map(str::to_owned);
        let buffer = if target.eq_ignore_ascii_case(state.current_nick()) {
            author.clone()
        } else {
            Some(target.to_owned())
        };
        let line = match Ctcp::parse(text) {
            Some(Ctcp {
                kind: CtcpKind::Action,
                params,
            }) => BufferMessage::action(author, params.unwrap_or_default()),
            _ => BufferMessage::chat(author, text),
        };
        state.append(buffer, line);
    }
}

/// `NICK`: follow our own nick changes.
pub struct NickHandler;

impl IncomingHandler for NickHandler {
    fn handle(&self, state: &mut SessionState, msg: &Message) {
        passthrough(state, msg);
        let Some(new_nick) = msg.arg(0) else {
            return;
        };
        let is_self = msg
            .source_nickname()
            .is_some_and(|nick| nick.eq_ignore_ascii_case(state.current_nick()));
        if is_self {
            info!(nick = %new_nick, "Nickname changed");
            state.set_current_nick(new_nick);
        }
    }
}

/// `001 RPL_WELCOME`: its first parameter is the nick we registered with.
pub struct WelcomeHandler;

impl IncomingHandler for WelcomeHandler {
    fn handle(&self, state: &mut SessionState, msg: &Message) {
        passthrough(state, msg);
        if let Some(nick) = msg.arg(0) {
            info!(nick = %nick, "Registered");
            state.set_current_nick(nick);
        }
    }
}

/// Dispatch table for server messages.
pub struct IncomingRegistry {
    handlers: HashMap<&'static str, Box<dyn IncomingHandler>>,
}

impl IncomingRegistry {
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn IncomingHandler>> = HashMap::new();

        handlers.insert("PING", Box::new(PingHandler));
        handlers.insert("JOIN", Box::new(JoinHandler));
        handlers.insert("PRIVMSG", Box::new(PrivmsgHandler));
        handlers.insert("NICK", Box::new(NickHandler));

        // Numerics
        handlers.insert("001", Box::new(WelcomeHandler));
        handlers.insert("433", Box::new(NickInUseHandler));

        Self { handlers }
    }

    /// Commands with a dedicated handler, sorted.
    pub fn commands(&self) -> Vec<&'static str> {
        let mut commands: Vec<_> = self.handlers.keys().copied().collect();
        commands.sort_unstable();
        commands
    }

    /// Route `msg` to its handler, or to [`passthrough`].
    pub fn dispatch(&self, state: &mut SessionState, msg: &Message) {
        let command = msg.command_name();
        debug!(command = %command, "Dispatching incoming message");
        match self.handlers.get(command.as_str()) {
            Some(handler) => handler.handle(state, msg),
            None => passthrough(state, msg),
        }
    }
}

impl Default for IncomingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
