//! Layered configuration for the access layer.
//!
//! Sources, later overriding earlier:
//! 1. Bundled defaults (`frontdesk.toml` shipped with the library)
//! 2. `~/.config/frontdesk/frontdesk.toml`
//! 3. `./frontdesk.toml`

use config::{Config, File, FileFormat};
use derive_getters::Getters;
use frontdesk_cache::CacheConfig;
use frontdesk_error::{ConfigError, FrontdeskError, FrontdeskResult};
use frontdesk_rate_limit::RateLimiterConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Where the inbox API lives and how to authenticate.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Getters)]
pub struct ApiConfig {
    /// API root, without trailing slash
    #[serde(default = "default_base_url")]
    base_url: String,

    /// Environment variable holding the API token
    #[serde(default = "default_token_env")]
    token_env: String,
}

fn default_base_url() -> String {
    "https://api2.frontapp.com".to_string()
}

fn default_token_env() -> String {
    "FRONT_API_TOKEN".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token_env: default_token_env(),
        }
    }
}

impl ApiConfig {
    /// Read the API token from the configured environment variable.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the variable is unset or empty.
    pub fn token(&self) -> FrontdeskResult<String> {
        match std::env::var(&self.token_env) {
            Ok(token) if !token.trim().is_empty() => Ok(token),
            _ => Err(FrontdeskError::from(ConfigError::missing_token(&self.token_env))),
        }
    }
}

/// Top-level Frontdesk configuration.
///
/// # Example
///
/// ```no_run
/// use frontdesk_client::FrontdeskConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = FrontdeskConfig::load()?;
/// println!("window: {:?}", config.limiter.window());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
pub struct FrontdeskConfig {
    /// Inbox API location
    #[serde(default)]
    pub api: ApiConfig,

    /// Rate limiter budget
    #[serde(default)]
    pub limiter: RateLimiterConfig,

    /// Read cache behaviour
    #[serde(default)]
    pub cache: CacheConfig,
}

impl FrontdeskConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FrontdeskResult<Self> {
        debug!("Loading configuration from file");

        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                FrontdeskError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FrontdeskError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and silently skipped if not found.
    #[instrument]
    pub fn load() -> FrontdeskResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../frontdesk.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/frontdesk/frontdesk.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("frontdesk").required(false));

        builder
            .build()
            .map_err(|e| {
                FrontdeskError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                FrontdeskError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
