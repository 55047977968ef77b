//! Provider configuration
//!
//! Every setting can be given explicitly; anything left unset falls back to
//! its `CLOUDCONNEXA_*` environment variable.

use secrecy::{ExposeSecret, SecretString};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::api::{ApiError, ClientConfig};

pub const ENV_CLIENT_ID: &str = "CLOUDCONNEXA_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "CLOUDCONNEXA_CLIENT_SECRET";
pub const ENV_BASE_URL: &str = "CLOUDCONNEXA_BASE_URL";
pub const ENV_RATE_LIMIT_INTERVAL_MS: &str = "CLOUDCONNEXA_RATE_LIMIT_INTERVAL_MS";
pub const ENV_RATE_LIMIT_BURST: &str = "CLOUDCONNEXA_RATE_LIMIT_BURST";
pub const ENV_TIMEOUT_SECONDS: &str = "CLOUDCONNEXA_TIMEOUT_SECONDS";
pub const ENV_CACHE_TTL_SECONDS: &str = "CLOUDCONNEXA_CACHE_TTL_SECONDS";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "client_id is required (set in provider config or {} env var)",
        ENV_CLIENT_ID
    )]
    MissingClientId,

    #[error(
        "client_secret is required (set in provider config or {} env var)",
        ENV_CLIENT_SECRET
    )]
    MissingClientSecret,

    #[error(
        "base_url is required (set in provider config or {} env var)",
        ENV_BASE_URL
    )]
    MissingBaseUrl,

    #[error("invalid value for {name}: {value:?}")]
    InvalidSetting { name: String, value: String },

    #[error("Provider not configured")]
    NotConfigured,

    #[error("Failed to create API client: {0}")]
    Client(#[from] ApiError),
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<SecretString>,
    pub base_url: Option<String>,
    pub rate_limit_interval: Option<Duration>,
    pub rate_limit_burst: Option<u32>,
    pub request_timeout: Option<Duration>,
    pub cache_ttl: Option<Duration>,
    pub fan_out: Option<usize>,
}

/// Fully validated settings, ready to build a [`crate::api::Client`].
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub client_id: String,
    pub client_secret: SecretString,
    pub base_url: String,
    pub client: ClientConfig,
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(mut self, client_id: &str, client_secret: &str) -> Self {
        self.client_id = Some(client_id.to_string());
        self.client_secret = Some(SecretString::from(client_secret.to_string()));
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }

    pub fn with_rate_limit(mut self, interval: Duration, burst: u32) -> Self {
        self.rate_limit_interval = Some(interval);
        self.rate_limit_burst = Some(burst);
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    /// Fill unset fields from the environment and validate.
    ///
    /// Runs before any network call, so a bad setup never reaches the API.
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let client_id = self
            .client_id
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| env_string(ENV_CLIENT_ID))
            .ok_or(ConfigError::MissingClientId)?;

        let client_secret = self
            .client_secret
            .clone()
            .filter(|s| !s.expose_secret().trim().is_empty())
            .or_else(|| env_string(ENV_CLIENT_SECRET).map(SecretString::from))
            .ok_or(ConfigError::MissingClientSecret)?;

        let base_url = self
            .base_url
            .clone()
            .filter(|s| !s.trim().is_empty())
            .or_else(|| env_string(ENV_BASE_URL))
            .ok_or(ConfigError::MissingBaseUrl)?;

        let mut client = ClientConfig::default();

        if let Some(interval) = setting(
            self.rate_limit_interval,
            ENV_RATE_LIMIT_INTERVAL_MS,
            Duration::from_millis,
        )? {
            client.rate_limit.interval = positive("rate_limit_interval", interval)?;
        }
        if let Some(burst) = setting(self.rate_limit_burst, ENV_RATE_LIMIT_BURST, |b| b)? {
            if burst == 0 {
                return Err(invalid("rate_limit_burst", burst));
            }
            client.rate_limit.burst = burst;
        }
        if let Some(timeout) =
            setting(self.request_timeout, ENV_TIMEOUT_SECONDS, Duration::from_secs)?
        {
            client.transport.request_timeout = positive("request_timeout", timeout)?;
        }
        client.cache_ttl = setting(self.cache_ttl, ENV_CACHE_TTL_SECONDS, Duration::from_secs)?
            .filter(|ttl| !ttl.is_zero());
        if let Some(fan_out) = self.fan_out {
            if fan_out == 0 {
                return Err(invalid("fan_out", fan_out));
            }
            client.fan_out = fan_out;
        }

        Ok(ResolvedConfig {
            client_id,
            client_secret,
            base_url,
            client,
        })
    }
}

/// Non-empty environment value, if any.
fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Explicit value, else the parsed environment variable mapped through `convert`.
fn setting<T, R, F>(explicit: Option<R>, env: &str, convert: F) -> Result<Option<R>, ConfigError>
where
    T: FromStr,
    F: Fn(T) -> R,
{
    if explicit.is_some() {
        return Ok(explicit);
    }
    match env_string(env) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(|v| Some(convert(v)))
            .map_err(|_| invalid(env, raw)),
        None => Ok(None),
    }
}

fn positive(name: &str, value: Duration) -> Result<Duration, ConfigError> {
    if value.is_zero() {
        Err(invalid(name, format!("{:?}", value)))
    } else {
        Ok(value)
    }
}

fn invalid(name: &str, value: impl ToString) -> ConfigError {
    ConfigError::InvalidSetting {
        name: name.to_string(),
        value: value.to_string(),
    }
}
