//! CLI command definitions.

use clap::{Parser, Subcommand};
use frontdesk::{ConfigError, FrontdeskError, FrontdeskResult, Method};
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Frontdesk - rate-limited, caching access to the support inbox API
#[derive(Parser, Debug)]
#[command(name = "frontdesk")]
#[command(about = "Rate-limited, caching access to the support inbox API", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Load configuration from this file instead of the layered defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print limiter and cache statistics to stderr after the command
    #[arg(long, global = true)]
    pub stats: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read a resource (e.g. /conversations?q[statuses][]=open)
    Get {
        /// API path, starting with '/'
        path: String,

        /// Issue the read this many times (repeats are served from cache)
        #[arg(long, default_value_t = 1)]
        repeat: u32,
    },

    /// Create a resource
    Post {
        /// API path, starting with '/'
        path: String,

        /// JSON request body
        #[arg(long, default_value = "{}")]
        body: String,
    },

    /// Partially update a resource
    Patch {
        /// API path, starting with '/'
        path: String,

        /// JSON request body
        #[arg(long)]
        body: String,
    },

    /// Replace a resource
    Put {
        /// API path, starting with '/'
        path: String,

        /// JSON request body
        #[arg(long)]
        body: String,
    },

    /// Delete a resource
    Delete {
        /// API path, starting with '/'
        path: String,
    },

    /// Print the effective configuration as TOML
    Config,
}

impl Commands {
    /// HTTP verb for request commands, `None` for local commands.
    pub fn method(&self) -> Option<Method> {
        match self {
            Commands::Get { .. } => Some(Method::Get),
            Commands::Post { .. } => Some(Method::Post),
            Commands::Patch { .. } => Some(Method::Patch),
            Commands::Put { .. } => Some(Method::Put),
            Commands::Delete { .. } => Some(Method::Delete),
            Commands::Config => None,
        }
    }
}

/// Parse a `--body` argument as JSON.
pub fn parse_body(raw: &str) -> FrontdeskResult<JsonValue> {
    serde_json::from_str(raw).map_err(|e| {
        FrontdeskError::from(ConfigError::new(format!("Invalid JSON body: {}", e)))
    })
}
