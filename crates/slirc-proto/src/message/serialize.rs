//! Message encoding.

use tracing::warn;

use super::types::Message;

/// Maximum size of an encoded line, terminator included.
pub const MAX_LINE_LEN: usize = 512;

/// Maximum size of an encoded line before `\r\n` is appended.
pub const MAX_LINE_LEN_WITHOUT_CRLF: usize = MAX_LINE_LEN - 2;

fn assert_wire_safe(what: &str, value: &str) {
    assert!(
        !value.contains(['\0', '\r', '\n']),
        "line break or NUL in {what} {value:?}"
    );
}

impl Message {
    /// Serialize to wire bytes, `\r\n` included.
    ///
    /// Lines longer than [`MAX_LINE_LEN`] are truncated, never rejected.
    ///
    /// # Panics
    ///
    /// Panics if any part contains NUL, CR or LF, if the command or a
    /// non-trailing parameter contains a space, or if a non-trailing
    /// parameter is empty or starts with `:`. Messages are built by the
    /// client itself, so this is a bug at the call site rather than bad input.
    pub fn encode(&self) -> Vec<u8> {
        let command = self.command.to_ascii_uppercase();
        assert!(!command.is_empty(), "empty command");
        assert!(!command.contains(' '), "space in command {command:?}");
        assert_wire_safe("command", &command);

        let mut line = String::with_capacity(64);
        if let Some(source) = self.source.as_deref().filter(|s| !s.is_empty()) {
            line.push(':');
            line.push_str(source);
            line.push(' ');
        }
        line.push_str(&command);

        if let Some((trailing, middle)) = self.params.split_last() {
            for param in middle {
                assert!(!param.is_empty(), "empty middle param");
                assert!(!param.starts_with(':'), "leading colon in middle param {param:?}");
                assert!(!param.contains(' '), "space in param {param:?}");
                assert_wire_safe("param", param);
                line.push(' ');
                line.push_str(param);
            }
            assert_wire_safe("trailing param", trailing);
            line.push_str(" :");
            line.push_str(trailing);
        }

        let mut bytes = line.into_bytes();
        if bytes.len() > MAX_LINE_LEN_WITHOUT_CRLF {
            warn!(
                command = %command,
                len = bytes.len(),
                limit = MAX_LINE_LEN_WITHOUT_CRLF,
                "Outgoing line too long, truncating"
            );
            bytes.truncate(MAX_LINE_LEN_WITHOUT_CRLF);
        }
        bytes.extend_from_slice(b"\r\n");
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_without_params() {
        assert_eq!(Message::new("quit", Vec::<String>::new()).encode(), b"QUIT\r\n");
    }

    #[test]
    fn test_encode_with_source() {
        let msg = Message::new("PRIVMSG", ["#c", "hello there"]).with_source("n!u@h");
        assert_eq!(msg.encode(), b":n!u@h PRIVMSG #c :hello there\r\n");
    }

    #[test]
    fn test_encode_single_param_is_trailing() {
        assert_eq!(Message::nick("bob").encode(), b"NICK :bob\r\n");
    }

    #[test]
    fn test_encode_middle_params() {
        let msg = Message::user("bob", "Bob Smith");
        assert_eq!(msg.encode(), b"USER bob 0 * :Bob Smith\r\n");
    }

    #[test]
    fn test_encode_truncates() {
        let msg = Message::privmsg("#c", "x".repeat(600));
        let bytes = msg.encode();
        assert_eq!(bytes.len(), MAX_LINE_LEN);
        assert!(bytes.ends_with(b"\r\n"));
        assert!(bytes.starts_with(b"PRIVMSG #c :xxx"));
    }

    #[test]
    fn test_encode_exact_limit_untouched() {
        // "PRIVMSG #c :" is 12 bytes
        let msg = Message::privmsg("#c", "y".repeat(MAX_LINE_LEN_WITHOUT_CRLF - 12));
        let bytes = msg.encode();
        assert_eq!(bytes.len(), MAX_LINE_LEN);
        assert!(bytes[..MAX_LINE_LEN - 2].ends_with(b"y"));
    }

    #[test]
    #[should_panic(expected = "space in param")]
    fn test_encode_rejects_space_in_middle_param() {
        let _ = Message::new("MODE", ["#c x", "+o"]).encode();
    }

    #[test]
    #[should_panic(expected = "leading colon in middle param")]
    fn test_encode_rejects_colon_prefixed_middle_param() {
        let _ = Message::new("KICK", ["#c", ":bob", "go away"]).encode();
    }

    #[test]
    #[should_panic(expected = "empty middle param")]
    fn test_encode_rejects_empty_middle_param() {
        let _ = Message::new("MODE", ["", "+o"]).encode();
    }

    #[test]
    #[should_panic(expected = "line break or NUL in trailing param")]
    fn test_encode_rejects_line_break_in_trailing() {
        let _ = Message::privmsg("#c", "hi\r\nQUIT :pwned").encode();
    }

    #[test]
    fn test_encode_trailing_may_start_with_colon() {
        let msg = Message::new("KICK", ["#c", ":bob go away"]);
        assert_eq!(msg.encode(), b"KICK #c ::bob go away\r\n");
        let encoded = msg.encode();
        assert_eq!(Message::decode(encoded.strip_suffix(b"\r\n").unwrap()).unwrap(), msg);
    }
}
