//! Message decoding.
//!
//! Decoding is lenient about text encoding: byte sequences that are not valid
//! UTF-8 are dropped and the rest of the line is kept. It is strict about
//! framing: a NUL, CR or LF inside the line is a hard error.

use std::str::FromStr;

use crate::error::{MessageParseError, ProtocolError};

use super::types::Message;

/// Decode raw bytes to text, silently discarding invalid sequences.
pub(crate) fn decode_lossy(raw: &[u8]) -> String {
    let mut text = String::with_capacity(raw.len());
    for chunk in raw.utf8_chunks() {
        text.push_str(chunk.valid());
    }
    text
}

fn malformed(line: &str, cause: MessageParseError) -> ProtocolError {
    ProtocolError::MalformedMessage {
        line: line.to_owned(),
        cause,
    }
}

impl Message {
    /// Decode one framed line (without its terminator).
    pub fn decode(raw: &[u8]) -> Result<Message, ProtocolError> {
        decode_lossy(raw).parse()
    }
}

impl FromStr for Message {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Message, Self::Err> {
        if s.is_empty() {
            return Err(malformed(s, MessageParseError::EmptyMessage));
        }
        if let Some(ch) = s.chars().find(|c| matches!(c, '\0' | '\r' | '\n')) {
            return Err(malformed(s, MessageParseError::IllegalControlChar(ch)));
        }

        let (head, trailing) = match s.split_once(" :") {
            Some((head, trailing)) => (head, Some(trailing)),
            None => (s, None),
        };

        let mut tokens = head.split(' ');
        let mut command = tokens.next().unwrap_or_default();
        let mut source = None;
        if let Some(prefix) = command.strip_prefix(':') {
            source = Some(prefix.to_owned());
            command = tokens.next().unwrap_or_default();
        }
        if command.is_empty() {
            return Err(malformed(s, MessageParseError::MissingCommand));
        }

        let params = tokens
            .map(str::to_owned)
            .chain(trailing.map(str::to_owned))
            .collect();

        Ok(Message {
            source,
            command: command.to_owned(),
            params,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_ping() {
        let msg: Message = "PING :irc.example.net".parse().unwrap();
        assert_eq!(msg.source, None);
        assert_eq!(msg.command, "PING");
        assert_eq!(msg.params, vec!["irc.example.net"]);
    }

    #[test]
    fn test_parse_privmsg() {
        let msg: Message = ":nick!user@host PRIVMSG #channel :Hello, world!"
            .parse()
            .unwrap();
        assert_eq!(msg.source.as_deref(), Some("nick!user@host"));
        assert_eq!(msg.command, "PRIVMSG");
        assert_eq!(msg.params, vec!["#channel", "Hello, world!"]);
    }

    #[test]
    fn test_parse_without_trailing() {
        let msg: Message = ":alice!a@h JOIN #rust".parse().unwrap();
        assert_eq!(msg.params, vec!["#rust"]);

        let msg: Message = "QUIT".parse().unwrap();
        assert!(msg.params.is_empty());
    }

    #[test]
    fn test_parse_trailing_keeps_colons() {
        let msg: Message = ":s 332 me #c :topic :with colons".parse().unwrap();
        assert_eq!(msg.params, vec!["me", "#c", "topic :with colons"]);
    }

    #[test]
    fn test_parse_empty_trailing() {
        let msg: Message = "TOPIC #c :".parse().unwrap();
        assert_eq!(msg.params, vec!["#c", ""]);
    }

    #[test]
    fn test_parse_lowercase_command_preserved() {
        let msg: Message = "privmsg #c :x".parse().unwrap();
        assert_eq!(msg.command, "privmsg");
        assert_eq!(msg.command_name(), "PRIVMSG");
    }

    #[test]
    fn test_parse_empty_message() {
        let result: Result<Message, _> = "".parse();
        assert!(matches!(
            result,
            Err(ProtocolError::MalformedMessage {
                cause: MessageParseError::EmptyMessage,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_source_only() {
        let result: Result<Message, _> = ":server".parse();
        assert!(matches!(
            result,
            Err(ProtocolError::MalformedMessage {
                cause: MessageParseError::MissingCommand,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_embedded_line_break() {
        let result = Message::decode(b"PING :a\rb");
        assert!(matches!(
            result,
            Err(ProtocolError::MalformedMessage {
                cause: MessageParseError::IllegalControlChar('\r'),
                ..
            })
        ));
        assert!(Message::decode(b"PING :a\0b").is_err());
    }

    #[test]
    fn test_decode_drops_invalid_utf8() {
        let msg = Message::decode(b":n PRIVMSG #c :caf\xc3\xa9 \xff\xfeok").unwrap();
        assert_eq!(msg.params, vec!["#c", "caf\u{e9} ok"]);
    }
}
