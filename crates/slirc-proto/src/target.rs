//! Buffer target classification.
//!
//! Every inbound message is routed to exactly one conversation buffer. The
//! rules are per command: some commands always name a channel first, numerics
//! name it second, a few have no channel concept at all.

use crate::message::Message;

/// Commands that never carry a channel.
const CHANNEL_LESS: &[&str] = &[
    "AUTHENTICATE",
    "PASS",
    "NICK",
    "PING",
    "PONG",
    "OPER",
    "QUIT",
    "ERROR",
    "LIST",
    "MOTD",
    "VERSION",
    "ADMIN",
    "CONNECT",
    "LUSERS",
    "TIME",
    "STATS",
    "HELP",
    "INFO",
    "WHOIS",
    "WHOWAS",
    "KILL",
    "REHASH",
    "RESTART",
    "SQUIT",
    "AWAY",
    "LINKS",
    "USERHOST",
    "WALLOPS",
    // WHO takes a mask that is often a channel, but replies come as numerics.
    "WHO",
];

/// Commands whose first parameter is always the channel.
const CHANNEL_FIRST: &[&str] = &["JOIN", "PART", "TOPIC", "NAMES", "KICK"];

/// Commands addressed to a target in their first parameter.
const TARGETED: &[&str] = &["MODE", "PRIVMSG", "NOTICE"];

/// Outcome of classifying a message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    /// Buffer the message belongs to. `None` is the status buffer.
    pub target: Option<String>,
    /// Parameters left once the target has been taken out.
    pub params: Vec<String>,
}

impl Route {
    fn status(params: &[String]) -> Self {
        Self {
            target: None,
            params: params.to_vec(),
        }
    }

    fn to(target: &str, params: Vec<String>) -> Self {
        Self {
            target: Some(target.to_owned()),
            params,
        }
    }
}

/// Work out which buffer `msg` concerns and strip that target from its params.
///
/// `is_channel` decides whether a numeric's second parameter names a channel.
/// For `MODE`, `PRIVMSG` and `NOTICE` the first parameter is the target
/// whether or not it is a channel, so a private message lands in a buffer
/// named after the peer it was addressed to.
pub fn pop_channel<F>(msg: &Message, is_channel: F) -> Route
where
    F: Fn(&str) -> bool,
{
    let params = &msg.params;
    let command = msg.command_name();

    if msg.is_numeric() {
        return match params.get(1) {
            Some(chan) if is_channel(chan) => Route::to(chan, params[2..].to_vec()),
            _ => Route::status(params),
        };
    }

    let command = command.as_str();
    if TARGETED.contains(&command) {
        return match params.first() {
            Some(target) => Route::to(target, params[1..].to_vec()),
            None => Route::status(params),
        };
    }
    if CHANNEL_LESS.contains(&command) {
        return Route::status(params);
    }
    if CHANNEL_FIRST.contains(&command) {
        return match params.first() {
            Some(chan) => Route::to(chan, params[1..].to_vec()),
            None => Route::status(params),
        };
    }
    if command == "INVITE" {
        return match params.get(1) {
            Some(chan) => {
                let mut rest = Vec::with_capacity(params.len() - 1);
                rest.push(params[0].clone());
                rest.extend_from_slice(&params[2..]);
                Route::to(chan, rest)
            }
            None => Route::status(params),
        };
    }

    Route::status(params)
}
