//! Renderer that records output for assertions.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use slircc::state::BufferMessage;
use slircc::ui::Renderer;

/// Screen contents as plain strings. Clones share the same screen.
#[derive(Clone, Default)]
pub struct RecordingRenderer {
    screen: Arc<Mutex<Vec<String>>>,
    clears: Arc<Mutex<usize>>,
}

impl RecordingRenderer {
    pub fn lines(&self) -> Vec<String> {
        self.screen.lock().clone()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.screen.lock().iter().any(|l| l == line)
    }

    pub fn clears(&self) -> usize {
        *self.clears.lock()
    }
}

impl Renderer for RecordingRenderer {
    fn clear(&mut self) -> io::Result<()> {
        self.screen.lock().clear();
        *self.clears.lock() += 1;
        Ok(())
    }

    fn render(&mut self, message: &BufferMessage) -> io::Result<()> {
        let line = match &message.author {
            Some(author) if message.action => format!("* {author} {}", message.content),
            Some(author) => format!("<{author}> {}", message.content),
            None => format!("{} {}", message.prefix.as_str(), message.content),
        };
        self.screen.lock().push(line);
        Ok(())
    }
}
