//! Line-based codec for tokio.
//!
//! Splits on `\n` and strips one trailing `\r`. Servers that terminate with a
//! bare `\n` and blank lines in the stream are both tolerated: a line that is
//! empty once the terminator is removed is skipped, never yielded.
//!
//! Lines longer than the configured limit are reported once and then thrown
//! away up to the next `\n`, so a peer that never sends a terminator cannot
//! grow the buffer without bound.

use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::Decoder;

use crate::error;
use crate::message::MAX_LINE_LEN;

/// Line-based codec that yields non-empty lines without their terminator.
#[derive(Debug)]
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length, terminator included
    max_len: usize,
    /// Dropping the rest of an over-long line
    discarding: bool,
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::with_max_len(MAX_LINE_LEN)
    }
}

impl LineCodec {
    /// Create a new codec limited to [`MAX_LINE_LEN`] bytes per line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a codec with a custom line length limit.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }
}

impl Decoder for LineCodec {
    type Item = Bytes;
    type Error = error::ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> error::Result<Option<Bytes>> {
        loop {
            let newline = src[self.next_index..].iter().position(|b| *b == b'\n');

            if self.discarding {
                match newline {
                    Some(offset) => {
                        src.advance(self.next_index + offset + 1);
                        self.next_index = 0;
                        self.discarding = false;
                        continue;
                    }
                    None => {
                        src.clear();
                        self.next_index = 0;
                        return Ok(None);
                    }
                }
            }

            let Some(offset) = newline else {
                if src.len() > self.max_len {
                    let actual = src.len();
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    return Err(error::ProtocolError::MessageTooLong {
                        actual,
                        limit: self.max_len,
                    });
                }
                // No complete line yet - remember where we stopped
                self.next_index = src.len();
                return Ok(None);
            };

            let mut line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if line.len() > self.max_len {
                return Err(error::ProtocolError::MessageTooLong {
                    actual: line.len(),
                    limit: self.max_len,
                });
            }

            line.truncate(line.len() - 1);
            if line.last() == Some(&b'\r') {
                line.truncate(line.len() - 1);
            }

            if !line.is_empty() {
                return Ok(Some(line.freeze()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_complete_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :test\r\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result.as_deref(), Some(&b"PING :test"[..]));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_decode_partial_line() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"test\n");
        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result.as_deref(), Some(&b"PING :test"[..]));
    }

    #[test]
    fn test_decode_skips_empty_lines() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :x\r\n\r\n\nPING :y\n");

        let first = codec.decode(&mut buf).unwrap();
        let second = codec.decode(&mut buf).unwrap();
        assert_eq!(first.as_deref(), Some(&b"PING :x"[..]));
        assert_eq!(second.as_deref(), Some(&b"PING :y"[..]));
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
    }

    #[test]
    fn test_decode_cr_split_across_reads() {
        let mut codec = LineCodec::new();
        let mut buf = BytesMut::from("PING :x\r");

        assert_eq!(codec.decode(&mut buf).unwrap(), None);

        buf.extend_from_slice(b"\n");
        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result.as_deref(), Some(&b"PING :x"[..]));
    }

    #[test]
    fn test_decode_rejects_long_complete_line() {
        let mut codec = LineCodec::with_max_len(16);
        let mut buf = BytesMut::from("PRIVMSG #c :way too long\r\nPING :ok\r\n");

        let err = codec.decode(&mut buf).unwrap_err();
        assert!(matches!(
            err,
            error::ProtocolError::MessageTooLong { actual: 26, limit: 16 }
        ));
        assert!(err.is_recoverable());

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result.as_deref(), Some(&b"PING :ok"[..]));
    }

    #[test]
    fn test_decode_line_at_limit_is_accepted() {
        let mut codec = LineCodec::with_max_len(10);
        let mut buf = BytesMut::from("PING :abc\n");

        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result.as_deref(), Some(&b"PING :abc"[..]));
    }

    #[test]
    fn test_decode_discards_unterminated_flood() {
        let mut codec = LineCodec::with_max_len(16);
        let mut buf = BytesMut::from(&[b'x'; 40][..]);

        assert!(codec.decode(&mut buf).is_err());
        assert!(buf.is_empty());

        // Still inside the same line: dropped silently, nothing retained.
        buf.extend_from_slice(&[b'y'; 100]);
        assert_eq!(codec.decode(&mut buf).unwrap(), None);
        assert!(buf.is_empty());

        buf.extend_from_slice(b"yyy\r\nPING :ok\r\n");
        let result = codec.decode(&mut buf).unwrap();
        assert_eq!(result.as_deref(), Some(&b"PING :ok"[..]));
    }

    #[test]
    fn test_default_limit_is_protocol_maximum() {
        let mut codec = LineCodec::new();
        let mut ok = BytesMut::new();
        ok.extend_from_slice(&[b'a'; MAX_LINE_LEN - 2]);
        ok.extend_from_slice(b"\r\n");
        assert!(codec.decode(&mut ok).unwrap().is_some());

        let mut long = BytesMut::new();
        long.extend_from_slice(&[b'a'; MAX_LINE_LEN - 1]);
        long.extend_from_slice(b"\r\n");
        assert!(codec.decode(&mut long).is_err());
    }
}
