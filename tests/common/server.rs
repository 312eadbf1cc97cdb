//! Fake IRC server.

use std::time::Duration;

use slirc_proto::Message;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf};
use tokio::time::timeout;

/// Server side of an in-memory connection.
pub struct TestServer {
    lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
    writer: WriteHalf<DuplexStream>,
}

impl TestServer {
    /// Create a connected pair: the fake server and the stream to hand to the
    /// client.
    pub fn pair() -> (Self, DuplexStream) {
        let (client, server) = tokio::io::duplex(16 * 1024);
        let (read_half, writer) = tokio::io::split(server);
        let server = Self {
            lines: BufReader::new(read_half).lines(),
            writer,
        };
        (server, client)
    }

    /// Send a raw line, adding `\r\n`.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Next raw line from the client, without its terminator.
    pub async fn recv_raw(&mut self) -> anyhow::Result<String> {
        match timeout(Duration::from_secs(2), self.lines.next_line()).await?? {
            Some(line) => Ok(line),
            None => anyhow::bail!("client closed the connection"),
        }
    }

    /// Next message from the client.
    pub async fn recv(&mut self) -> anyhow::Result<Message> {
        let line = self.recv_raw().await?;
        Ok(line.parse()?)
    }

    /// Read until the client closes its side. Returns what was left.
    pub async fn drain(&mut self) -> anyhow::Result<Vec<String>> {
        let mut rest = Vec::new();
        while let Some(line) = timeout(Duration::from_secs(2), self.lines.next_line()).await?? {
            rest.push(line);
        }
        Ok(rest)
    }

    /// Close the server side.
    pub async fn close(mut self) -> anyhow::Result<()> {
        self.writer.shutdown().await?;
        Ok(())
    }
}
