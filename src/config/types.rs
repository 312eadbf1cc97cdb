//! Core configuration types and loading.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Default IRC-over-TLS port.
pub const DEFAULT_PORT: u16 = 6697;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Client configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Server to connect to.
    pub server: ServerConfig,
    /// Who we are on the network.
    pub identity: IdentityConfig,
    /// Loop polling intervals.
    #[serde(default)]
    pub ui: UiConfig,
    /// Log output.
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from `<hostname> <port> <nick>` arguments.
    pub fn from_args(host: &str, port: &str, nick: &str) -> Result<Self, ConfigError> {
        let port = port
            .parse::<u16>()
            .map_err(|e| ConfigError::Invalid(format!("port {port:?}: {e}")))?;

        let config = Config {
            server: ServerConfig {
                host: host.to_string(),
                port,
                tls: true,
            },
            identity: IdentityConfig {
                nick: nick.to_string(),
                username: None,
                realname: None,
            },
            ui: UiConfig::default(),
            log: LogConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Server connection configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Hostname, also used for TLS server name verification.
    pub host: String,
    /// TCP port.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Whether to wrap the connection in TLS.
    #[serde(default = "default_tls")]
    pub tls: bool,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_tls() -> bool {
    true
}

/// Identity sent during registration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Requested nickname. Suffixed with a counter on collision.
    pub nick: String,
    /// Username for USER. Defaults to the nick.
    pub username: Option<String>,
    /// Real name for USER. Defaults to the nick.
    pub realname: Option<String>,
}

impl IdentityConfig {
    /// Username to register with.
    pub fn username(&self) -> &str {
        self.username.as_deref().unwrap_or(&self.nick)
    }

    /// Real name to register with.
    pub fn realname(&self) -> &str {
        self.realname.as_deref().unwrap_or(&self.nick)
    }
}

/// How often the input and display loops wake up to check for shutdown.
#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_input_poll_ms")]
    pub input_poll_ms: u64,
    #[serde(default = "default_display_poll_ms")]
    pub display_poll_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            input_poll_ms: default_input_poll_ms(),
            display_poll_ms: default_display_poll_ms(),
        }
    }
}

impl UiConfig {
    pub fn input_poll(&self) -> Duration {
        Duration::from_millis(self.input_poll_ms)
    }

    pub fn display_poll(&self) -> Duration {
        Duration::from_millis(self.display_poll_ms)
    }
}

fn default_input_poll_ms() -> u64 {
    100
}

fn default_display_poll_ms() -> u64 {
    10
}

/// Log destination. Stdout belongs to the chat display, so logs go to
/// stderr unless a file is given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogConfig {
    pub file: Option<PathBuf>,
}
