//! Integration test common infrastructure.
//!
//! A scripted fake server on the far end of an in-memory duplex stream, and
//! a renderer that records what the display loop draws.

pub mod renderer;
pub mod server;

#[allow(unused_imports)]
pub use renderer::RecordingRenderer;
#[allow(unused_imports)]
pub use server::TestServer;

use std::time::Duration;

/// Poll `condition` until it holds, failing the test after two seconds.
#[allow(dead_code)]
pub async fn wait_until<F>(what: &str, mut condition: F)
where
    F: FnMut() -> bool,
{
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    while !condition() {
        assert!(tokio::time::Instant::now() < deadline, "timed out waiting for {what}");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}
