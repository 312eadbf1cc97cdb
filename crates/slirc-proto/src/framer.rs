//! Framer: turns a byte stream into protocol lines.

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::codec::Decoder;

use crate::error;
use crate::line::LineCodec;
use crate::message::Message;

const READ_CHUNK: usize = 4096;

/// Accumulates bytes from a reader and hands out one line at a time.
///
/// Every turn of [`Framer::next_line`] either returns a buffered line or
/// performs exactly one read, so it never spins. It is cancel safe: bytes
/// already read stay in the accumulator if the future is dropped.
#[derive(Debug)]
pub struct Framer<R> {
    reader: R,
    buffer: BytesMut,
    codec: LineCodec,
}

impl<R: AsyncRead + Unpin> Framer<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self::with_buffer(reader, BytesMut::with_capacity(READ_CHUNK))
    }

    /// Wrap a reader, seeding the accumulator with bytes already received.
    pub fn with_buffer(reader: R, buffer: BytesMut) -> Self {
        Self {
            reader,
            buffer,
            codec: LineCodec::new(),
        }
    }

    /// Next non-empty line, or `None` once the peer has closed the stream.
    ///
    /// A trailing fragment without a terminator at end of stream is dropped.
    /// An over-long line yields [`ProtocolError::MessageTooLong`] once; the
    /// framer stays usable and the following call resumes after it.
    ///
    /// [`ProtocolError::MessageTooLong`]: crate::ProtocolError::MessageTooLong
    pub async fn next_line(&mut self) -> error::Result<Option<Bytes>> {
        loop {
            if let Some(line) = self.codec.decode(&mut self.buffer)? {
                return Ok(Some(line));
            }
            self.buffer.reserve(READ_CHUNK);
            if self.reader.read_buf(&mut self.buffer).await? == 0 {
                return Ok(None);
            }
        }
    }

    /// Next line decoded as a [`Message`].
    ///
    /// The outer result carries transport errors, the inner one errors that
    /// only affect this line (malformed or over-long).
    pub async fn next_message(&mut self) -> error::Result<Option<error::Result<Message>>> {
        match self.next_line().await {
            Ok(line) => Ok(line.map(|line| Message::decode(&line))),
            Err(e) if e.is_recoverable() => Ok(Some(Err(e))),
            Err(e) => Err(e),
        }
    }

    /// Give back the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}
