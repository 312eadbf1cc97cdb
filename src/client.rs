//! Client lifecycle: connect, register, run the three loops, join them.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::ClientError;
use crate::handlers::{IncomingRegistry, OutgoingRegistry};
use crate::network::{self, run_network_loop};
use crate::state::{Session, SessionChannels};
use crate::ui::{self, Renderer, TerminalRenderer, run_display_loop, run_input_loop};

/// One client session against one server.
pub struct Client {
    config: Config,
    session: Arc<Session>,
    channels: SessionChannels,
}

impl Client {
    pub fn new(config: Config) -> Self {
        let (session, channels) = Session::new(config.identity.nick.clone());
        Self {
            config,
            session,
            channels,
        }
    }

    /// Shared session handle, e.g. for a signal handler to shut down.
    pub fn session(&self) -> Arc<Session> {
        Arc::clone(&self.session)
    }

    /// Connect to the configured server and run on the terminal.
    pub async fn run(self) -> Result<(), ClientError> {
        let stream = network::connect(&self.config.server).await?;
        let input = ui::spawn_stdin_reader();
        self.run_with(stream, input, TerminalRenderer::stdout())
            .await
            .map(drop)
    }

    /// Run over an established `stream`, reading user lines from `input` and
    /// drawing with `renderer`.
    ///
    /// Returns once all three loops have finished, with the renderer back.
    /// A transport failure is reported after the other loops have stopped.
    pub async fn run_with<S, R>(
        self,
        stream: S,
        input: mpsc::UnboundedReceiver<String>,
        renderer: R,
    ) -> Result<R, ClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
        R: Renderer + 'static,
    {
        let Self {
            config,
            session,
            channels,
        } = self;

        session.register(config.identity.username(), config.identity.realname());

        let network = tokio::spawn(run_network_loop(
            Arc::clone(&session),
            stream,
            channels.outbound,
            Arc::new(IncomingRegistry::new()),
        ));
        let input = tokio::spawn(run_input_loop(
            Arc::clone(&session),
            input,
            Arc::new(OutgoingRegistry::new()),
            config.ui.input_poll(),
        ));
        let display = tokio::spawn(run_display_loop(
            Arc::clone(&session),
            channels.display,
            renderer,
            config.ui.display_poll(),
        ));
        info!(nick = %config.identity.nick, "Client started");

        let network_result = network.await?;
        debug!("Network loop joined");
        input.await?;
        let renderer = display.await?;
        info!("Client stopped");

        network_result.map(|()| renderer)
    }
}
