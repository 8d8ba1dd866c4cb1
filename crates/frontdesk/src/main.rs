//! Frontdesk CLI binary.
//!
//! This binary provides command-line access to the inbox API through the
//! rate limiter and response cache:
//! - Issue reads and writes against any API path
//! - Inspect limiter and cache statistics
//! - Print the effective configuration

use clap::Parser;
use frontdesk::{FrontContext, FrontdeskConfig, LoggingConfig, init_logging};

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_request, show_config};

    // Pick up FRONT_API_TOKEN from a local .env if present
    let _ = dotenvy::dotenv();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let mut logging = LoggingConfig::new().with_json_logs(cli.json_logs);
    if cli.verbose {
        logging = logging.with_log_level("debug");
    }
    init_logging(logging)?;

    let config = match &cli.config {
        Some(path) => FrontdeskConfig::from_file(path)?,
        None => FrontdeskConfig::load()?,
    };

    // Execute the requested command
    match cli.command {
        Commands::Config => {
            show_config(&config)?;
        }
        command => {
            let ctx = FrontContext::from_config(&config)?;
            handle_request(&ctx, command, cli.stats).await?;
        }
    }

    Ok(())
}
