//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the frontdesk binary.

mod commands;
mod request;

pub use commands::{Cli, Commands, parse_body};
pub use request::{handle_request, show_config};
