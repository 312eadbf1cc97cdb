//! Terminal side of the client: the display queue, rendering and stdin.

mod display;
mod format;
mod input;

pub use display::{Renderer, TerminalRenderer, run_display_loop};
pub use format::irc_to_ansi;
pub use input::{run_input_loop, spawn_line_reader, spawn_stdin_reader};

use crate::state::{BufferMessage, BufferName};

/// One entry on the display queue.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    /// A line was appended to `buffer`. `seq` is its per-buffer sequence
    /// number.
    Append {
        buffer: BufferName,
        seq: u64,
        message: BufferMessage,
    },
    /// The active buffer changed. The renderer clears and replays it.
    Switch(BufferName),
}
