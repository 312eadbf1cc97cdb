//! Client state.
//!
//! [`Session`] is the one place where nick, active buffer and backlogs live.
//! Both dispatchers and the display loop reach it through a single lock.

mod buffer;
mod session;

pub use buffer::{BACKLOG_CAPACITY, Buffer, BufferMessage, BufferName, Marker};
pub use session::{Session, SessionChannels, SessionState};
