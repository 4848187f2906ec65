//! Terminal front-end support for the codetalk REPL.
//!
//! The REPL is presentation only: it renders session state and relays user
//! input to the session controller. This module holds the pieces the binary
//! is built from:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: slash command parsing

mod commands;
mod config;

pub use commands::{ReplCommand, help_text, parse_command};
pub use config::{ReplArgs, ReplConfig};
