//! slircc - Straylight IRC Client
//!
//! Usage: `slircc <hostname> <port> <nick>` or `slircc <config.toml>`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, bail};
use slircc::config::LogConfig;
use slircc::{Client, ClientError, Config};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: slircc <hostname> <port> <nick>\n       slircc <config.toml>";

fn load_config() -> anyhow::Result<Config> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match args.as_slice() {
        [host, port, nick] => Config::from_args(host, port, nick)?,
        [path] => Config::load(path).with_context(|| format!("loading {path}"))?,
        _ => bail!(USAGE),
    };
    Ok(config)
}

/// Logs go to stderr or a file, never stdout: stdout is the chat display.
fn init_tracing(log: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    match &log.file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::stderr).init(),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    init_tracing(&config.log)?;

    info!(
        host = %config.server.host,
        port = config.server.port,
        nick = %config.identity.nick,
        "Starting slircc"
    );

    let client = Client::new(config);
    let session = client.session();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Interrupted");
                session.shut_down();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });

    match client.run().await {
        Ok(()) => Ok(()),
        Err(ClientError::ConnectionClosed) => {
            eprintln!("Connection closed by server.");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Client failed");
            Err(e.into())
        }
    }
}
