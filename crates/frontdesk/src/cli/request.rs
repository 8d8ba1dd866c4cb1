//! Request command handlers.

use super::{Commands, parse_body};
use frontdesk::{CachingClient, FrontContext, FrontdeskConfig, FrontdeskResult};
use serde_json::Value as JsonValue;
use tracing::{debug, info, instrument};

/// Send one request command through the shared caching client.
#[instrument(skip(ctx, command), fields(method = ?command.method()))]
pub async fn handle_request(
    ctx: &FrontContext,
    command: Commands,
    show_stats: bool,
) -> FrontdeskResult<()> {
    let client = ctx.inbox();

    let value = match command {
        Commands::Get { path, repeat } => {
            let mut value = JsonValue::Null;
            for attempt in 0..repeat.max(1) {
                debug!(attempt, path = %path, "Issuing read");
                value = client.get(&path).await?;
            }
            value
        }
        Commands::Post { path, body } => client.post(&path, &parse_body(&body)?).await?,
        Commands::Patch { path, body } => client.patch(&path, &parse_body(&body)?).await?,
        Commands::Put { path, body } => client.put(&path, &parse_body(&body)?).await?,
        Commands::Delete { path } => client.delete(&path).await?,
        Commands::Config => return Ok(()),
    };

    print_json(&value);

    if show_stats {
        print_stats(client).await;
    }

    info!("Request complete");
    Ok(())
}

/// Print the effective configuration as TOML.
pub fn show_config(config: &FrontdeskConfig) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

fn print_json(value: &JsonValue) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

async fn print_stats(client: &CachingClient) {
    let stats = serde_json::json!({
        "limiter": client.stats(),
        "cache": client.cache_stats().await,
    });
    eprintln!("{}", stats);
}
