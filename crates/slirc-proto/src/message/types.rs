use crate::chan::ChannelExt;
use crate::target::{pop_channel, Route};

/// An owned IRC message.
///
/// `params` holds every parameter in order. The last one is sent as the
/// trailing parameter and is the only one allowed to contain spaces.
///
/// # Example
///
/// ```
/// use slirc_proto::Message;
///
/// let msg = Message::decode(b":nick!user@host PRIVMSG #channel :Hello there").unwrap();
/// assert_eq!(msg.source_nickname(), Some("nick"));
/// assert_eq!(msg.params, vec!["#channel", "Hello there"]);
///
/// let out = Message::privmsg("#channel", "Hi!").encode();
/// assert_eq!(out, b"PRIVMSG #channel :Hi!\r\n");
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Message {
    /// Sender prefix without the leading `:` (e.g. `nick!user@host`).
    pub source: Option<String>,
    /// Command token, numeric or alphabetic. Upper-cased on the wire.
    pub command: String,
    /// Ordered parameters, trailing parameter last.
    pub params: Vec<String>,
}

impl Message {
    /// Create a source-less message.
    #[must_use]
    pub fn new<C, I, P>(command: C, params: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            source: None,
            command: command.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Attach a source prefix.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// The nick part of the source (everything before `!`).
    pub fn source_nickname(&self) -> Option<&str> {
        self.source
            .as_deref()
            .map(|source| source.split('!').next().unwrap_or(source))
    }

    /// Upper-cased command name, as used for dispatch.
    pub fn command_name(&self) -> String {
        self.command.to_ascii_uppercase()
    }

    /// Whether the command is a three-digit style numeric reply.
    pub fn is_numeric(&self) -> bool {
        !self.command.is_empty() && self.command.bytes().all(|b| b.is_ascii_digit())
    }

    /// Parameter at `index`, if present.
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }

    /// Classify which buffer this message belongs to using the default
    /// channel-prefix predicate.
    pub fn route(&self) -> Route {
        pop_channel(self, |name| name.is_channel_name())
    }

    /// Create a PRIVMSG message to a target with text.
    #[must_use]
    pub fn privmsg(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new("PRIVMSG", [target.into(), text.into()])
    }

    /// Create a NOTICE message to a target with text.
    #[must_use]
    pub fn notice(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new("NOTICE", [target.into(), text.into()])
    }

    /// Create a NICK message.
    #[must_use]
    pub fn nick(nickname: impl Into<String>) -> Self {
        Self::new("NICK", [nickname.into()])
    }

    /// Create a USER registration message.
    #[must_use]
    pub fn user(username: impl Into<String>, realname: impl Into<String>) -> Self {
        Self::new(
            "USER",
            [username.into(), "0".to_owned(), "*".to_owned(), realname.into()],
        )
    }

    /// Create a PONG answering a PING token. An absent token yields a bare `PONG`.
    #[must_use]
    pub fn pong(token: Option<&str>) -> Self {
        Self::new("PONG", token.map(str::to_owned))
    }
}
