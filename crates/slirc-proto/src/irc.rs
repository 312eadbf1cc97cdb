//! IRC message encoder for tokio.

use bytes::BytesMut;
use tokio_util::codec::Encoder;

use crate::error;
use crate::message::Message;

/// Encoder for [`tokio_util::codec::FramedWrite`] that writes [`Message`]s
/// with their `\r\n` terminator, truncated to 512 bytes.
///
/// Only owned messages are encoded, so `Sink` calls on a `FramedWrite` of
/// this codec never need an item type annotation.
#[derive(Debug, Default, Clone, Copy)]
pub struct IrcCodec;

impl Encoder<Message> for IrcCodec {
    type Error = error::ProtocolError;

    fn encode(&mut self, msg: Message, dst: &mut BytesMut) -> error::Result<()> {
        dst.extend_from_slice(&msg.encode());
        Ok(())
    }
}
