//! slircc - Straylight IRC Client
//!
//! A small terminal IRC client. Three tasks share one [`state::Session`]:
//! the network loop reads and writes the server connection, the input loop
//! turns typed lines into commands, and the display loop renders the active
//! buffer.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod network;
pub mod state;
pub mod ui;

pub use client::Client;
pub use config::Config;
pub use error::{ClientError, HandlerError};
