//! Handlers for commands typed by the user.

use std::collections::HashMap;

use slirc_proto::{Ctcp, Message};
use tracing::debug;

use super::CommandHandler;
use crate::error::{HandlerError, HandlerResult};
use crate::state::{BufferMessage, SessionState};

/// Split typed arguments into parameters.
///
/// Arguments are whitespace separated. A word starting with `:` begins the
/// last parameter, which then runs to the end of the line with the colon
/// removed and its spacing kept.
pub fn split_params(args: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut rest = args.trim_start();
    while !rest.is_empty() {
        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }
        match rest.split_once(char::is_whitespace) {
            Some((word, tail)) => {
                params.push(word);
                rest = tail.trim_start();
            }
            None => {
                params.push(rest);
                break;
            }
        }
    }
    params
}

/// Whether `name` can go on the wire as a message target.
fn is_message_target(name: &str) -> bool {
    !name.is_empty() && !name.starts_with(':') && !name.contains(char::is_whitespace)
}

/// Send `command` upper-cased with `args` split by [`split_params`],
/// echoing it.
pub fn send_passthrough(state: &mut SessionState, command: &str, args: &str) {
    let msg = Message::new(command.to_ascii_uppercase(), split_params(args));
    state.send_with_echo(msg);
}

/// `/nick <nickname>`: new default nick, collision counter reset.
pub struct OutgoingNickHandler;

impl CommandHandler for OutgoingNickHandler {
    fn handle(&self, state: &mut SessionState, command: &str, args: &str) -> HandlerResult {
        let nick = args.trim();
        if nick.is_empty() || nick.contains(char::is_whitespace) {
            return Err(HandlerError::Usage("/nick <nickname>"));
        }
        state.set_default_nick(nick);
        send_passthrough(state, command, nick);
        Ok(())
    }
}

/// `/quit [reason]`: say goodbye and shut down.
pub struct QuitHandler;

impl CommandHandler for QuitHandler {
    fn handle(&self, state: &mut SessionState, _command: &str, args: &str) -> HandlerResult {
        let reason = args.trim();
        let msg = if reason.is_empty() {
            Message::new("QUIT", Vec::<String>::new())
        } else {
            Message::new("QUIT", [reason])
        };
        state.send_with_echo(msg);
        state.shut_down();
        Ok(())
    }
}

/// `/msg`, `/privmsg` and `/notice <target> <text...>`.
pub struct MsgHandler {
    command: &'static str,
    usage: &'static str,
}

impl MsgHandler {
    pub fn privmsg(usage: &'static str) -> Self {
        Self {
            command: "PRIVMSG",
            usage,
        }
    }

    pub fn notice() -> Self {
        Self {
            command: "NOTICE",
            usage: "/notice <target> <text>",
        }
    }
}

impl CommandHandler for MsgHandler {
    fn handle(&self, state: &mut SessionState, _command: &str, args: &str) -> HandlerResult {
        let (target, text) = args
            .trim_start()
            .split_once(char::is_whitespace)
            .map(|(target, text)| (target, text.trim_start()))
            .filter(|(target, text)| is_message_target(target) && !text.is_empty())
            .ok_or(HandlerError::Usage(self.usage))?;
        state.send_with_echo(Message::new(self.command, [target, text]));
        Ok(())
    }
}

/// `/me <text>`: CTCP `ACTION` to the active buffer.
pub struct MeHandler;

impl CommandHandler for MeHandler {
    fn handle(&self, state: &mut SessionState, _command: &str, args: &str) -> HandlerResult {
        let text = args.trim();
        if text.is_empty() {
            return Err(HandlerError::Usage("/me <text>"));
        }
        let target = state
            .current_buffer()
            .filter(|name| is_message_target(name))
            .map(str::to_owned)
            .ok_or(HandlerError::TargetUnavailable)?;
        let author = Some(state.current_nick().to_owned());
        state.send(Message::privmsg(target.clone(), Ctcp::action(text).to_string()));
        state.append(Some(target), BufferMessage::action(author, text));
        Ok(())
    }
}

/// `/buffer [name]`: make `name` the active buffer, or the status buffer
/// when no name is given.
pub struct BufferHandler;

impl CommandHandler for BufferHandler {
    fn handle(&self, state: &mut SessionState, _command: &str, args: &str) -> HandlerResult {
        let name = args.trim();
        if name.contains(char::is_whitespace) || name.starts_with(':') {
            return Err(HandlerError::Usage("/buffer [name]"));
        }
        let buffer = (!name.is_empty()).then(|| name.to_owned());
        state.switch_buffer(buffer);
        Ok(())
    }
}

/// `/buffers`: list the known buffers.
pub struct BuffersHandler;

impl CommandHandler for BuffersHandler {
    fn handle(&self, state: &mut SessionState, _command: &str, _args: &str) -> HandlerResult {
        let names = state.buffer_names();
        state.display_info(format!("Buffer list: {}", names.join(" ")));
        Ok(())
    }
}

/// Dispatch table for user input.
pub struct OutgoingRegistry {
    handlers: HashMap<&'static str, Box<dyn CommandHandler>>,
}

impl OutgoingRegistry {
    pub fn new() -> Self {
        let mut handlers: HashMap<&'static str, Box<dyn CommandHandler>> = HashMap::new();

        handlers.insert("NICK", Box::new(OutgoingNickHandler));
        handlers.insert("QUIT", Box::new(QuitHandler));

        // Messaging
        handlers.insert("MSG", Box::new(MsgHandler::privmsg("/msg <target> <text>")));
        handlers.insert("PRIVMSG", Box::new(MsgHandler::privmsg("/privmsg <target> <text>")));
        handlers.insert("NOTICE", Box::new(MsgHandler::notice()));
        handlers.insert("ME", Box::new(MeHandler));

        // Buffers
        handlers.insert("BUF", Box::new(BufferHandler));
        handlers.insert("BUFFER", Box::new(BufferHandler));
        handlers.insert("BUFFERS", Box::new(BuffersHandler));

        Self { handlers }
    }

    /// Commands with a dedicated handler, sorted.
    pub fn commands(&self) -> Vec<&'static str> {
        let mut commands: Vec<_> = self.handlers.keys().copied().collect();
        commands.sort_unstable();
        commands
    }

    /// Run one `/command`. Unknown commands are sent as typed.
    pub fn run_command(&self, state: &mut SessionState, command: &str, args: &str) -> HandlerResult {
        let name = command.to_ascii_uppercase();
        debug!(command = %name, "Dispatching user command");
        match self.handlers.get(name.as_str()) {
            Some(handler) => handler.handle(state, command, args),
            None => {
                send_passthrough(state, command, args);
                Ok(())
            }
        }
    }

    /// Handle one line of user input.
    ///
    /// `/command args` runs a command. Anything else is a message to the
    /// active buffer. Empty lines are ignored.
    pub fn on_user_input(&self, state: &mut SessionState, line: &str) -> HandlerResult {
        let line: String = line
            .chars()
            .filter(|c| !matches!(c, '\0' | '\r' | '\n'))
            .collect();
        if line.is_empty() {
            return Ok(());
        }

        if let Some(rest) = line.strip_prefix('/') {
            let (command, args) = rest.split_once(' ').unwrap_or((rest, ""));
            if command.is_empty() {
                return Err(HandlerError::Usage("/<command> [args]"));
            }
            return self.run_command(state, command, args);
        }

        let target = state
            .current_buffer()
            .filter(|name| is_message_target(name))
            .map(str::to_owned)
            .ok_or(HandlerError::TargetUnavailable)?;
        state.send_with_echo(Message::privmsg(target, line));
        Ok(())
    }

    /// [`Self::on_user_input`], reporting failures in the active buffer.
    pub fn dispatch(&self, state: &mut SessionState, line: &str) {
        if let Err(e) = self.on_user_input(state, line) {
            debug!(error_code = e.error_code(), "User command rejected");
            state.display_error(e.to_string());
        }
    }
}

impl Default for OutgoingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
