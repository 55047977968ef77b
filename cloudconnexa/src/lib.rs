pub mod api;
pub mod config;

pub use config::{ConfigError, ProviderConfig, ResolvedConfig};

pub struct CloudConnexaProvider {
    client: Option<api::Client>,
}

impl Default for CloudConnexaProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CloudConnexaProvider {
    pub fn new() -> Self {
        Self { client: None }
    }

    /// Resolve `config` against the environment, authenticate, and keep the
    /// resulting client for later calls.
    ///
    /// On failure any previously configured client is left in place.
    pub async fn configure(&mut self, config: ProviderConfig) -> Result<(), ConfigError> {
        let resolved = config.resolve()?;
        tracing::debug!(
            "Configuring provider for {} (client id {})",
            resolved.base_url,
            resolved.client_id
        );

        let client = api::Client::with_config(
            &resolved.base_url,
            &resolved.client_id,
            resolved.client_secret,
            resolved.client,
        )
        .await
        .map_err(|e| {
            tracing::error!("Failed to create API client: {}", e);
            ConfigError::Client(e)
        })?;

        self.client = Some(client);
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn client(&self) -> Result<api::Client, ConfigError> {
        self.client.clone().ok_or(ConfigError::NotConfigured)
    }
}
