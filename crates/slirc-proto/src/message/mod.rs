//! IRC message type, decoding and encoding.

mod parse;
mod serialize;
mod types;

pub use self::serialize::{MAX_LINE_LEN, MAX_LINE_LEN_WITHOUT_CRLF};
pub use self::types::Message;
