//! Shared setup for API-backed commands

use crate::cache::CachedVenueClient;
use crate::client::VenueClient;
use crate::config::Config;
use crate::error::{ConfigError, Result};

/// Resolved context for a command that talks to the venue API.
pub struct CommandContext {
    pub client: CachedVenueClient<VenueClient>,
}

impl CommandContext {
    /// Load config and build the cached API client.
    ///
    /// `no_cache` disables the local cache so every call hits the API.
    pub fn new(config_path: Option<&str>, no_cache: bool) -> Result<Self> {
        let config = Config::load(config_path)?;
        config.validate()?;

        let api_url = config.api_url.as_deref().ok_or(ConfigError::MissingApiUrl)?;
        let api_key = config.api_key.clone().ok_or(ConfigError::MissingApiKey)?;

        let inner = VenueClient::new(api_url, api_key)?;
        let client = CachedVenueClient::new(inner, !no_cache);

        Ok(Self { client })
    }
}
