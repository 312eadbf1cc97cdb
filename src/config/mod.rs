//! Configuration loading and management.
//!
//! - [`types`]: config struct definitions and TOML loading
//! - [`validation`]: sanity checks run before connecting

mod types;
mod validation;

pub use types::{
    Config, ConfigError, IdentityConfig, LogConfig, ServerConfig, UiConfig, DEFAULT_PORT,
};
