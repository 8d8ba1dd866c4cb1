//! Per-process handle passed to command handlers.

use crate::{CachingClient, FrontdeskConfig, ReqwestTransport};
use frontdesk_error::FrontdeskResult;
use frontdesk_rate_limit::RateLimiter;
use std::sync::Arc;
use tracing::{info, instrument};

/// Owns the single caching client for the inbox API.
///
/// Build one at startup and hand it (or clones of it) to every command
/// handler; all clones share one cache and one limiter.
#[derive(Debug, Clone)]
pub struct FrontContext {
    inbox: CachingClient,
}

impl FrontContext {
    /// Wrap an already-built client.
    pub fn new(inbox: CachingClient) -> Self {
        Self { inbox }
    }

    /// Build the HTTP transport, limiter and cache described by `config`.
    ///
    /// # Errors
    ///
    /// Fails if the API token is missing, the limiter budget is invalid, or
    /// the HTTP client cannot be constructed.
    #[instrument(skip(config), fields(base_url = %config.api.base_url()))]
    pub fn from_config(config: &FrontdeskConfig) -> FrontdeskResult<Self> {
        let token = config.api.token()?;
        let transport = ReqwestTransport::new(config.api.base_url().clone(), token)?;
        let limiter = RateLimiter::new(config.limiter.clone())?;
        info!("Inbox client ready");
        Ok(Self::new(CachingClient::with_config(
            Arc::new(transport),
            limiter,
            config.cache.clone(),
        )))
    }

    /// The inbox API client.
    pub fn inbox(&self) -> &CachingClient {
        &self.inbox
    }

    /// Clear the read cache and reset the limiter.
    pub async fn reset_front_cache(&self) {
        self.inbox.reset().await;
    }
}
