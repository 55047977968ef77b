use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use super::auth;
use super::cache::ResponseCache;
use super::common::{ApiQueryParams, PageResponse};
use super::error::ApiError;
use super::pagination::{self, DEFAULT_PAGE_SIZE};
use super::pool::{RequestStats, StatsRecorder, TransportConfig};
use super::rate_limit::{RateLimitConfig, RateLimiter};

/// Cloud Connexa API client
///
/// Cheap to clone; clones share the bearer token, rate limiter, cache and
/// statistics.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
    cancel: CancellationToken,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: SecretString,
    token: RwLock<SecretString>,
    rate_limiter: RateLimiter,
    cache: ResponseCache,
    stats: StatsRecorder,
    config: ClientConfig,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub transport: TransportConfig,
    pub rate_limit: RateLimitConfig,
    /// GET responses are reused for this long when set.
    pub cache_ttl: Option<Duration>,
    pub page_size: u32,
    /// Parallel per-parent fetches for child-scoped lookups.
    pub fan_out: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            transport: TransportConfig::default(),
            rate_limit: RateLimitConfig::default(),
            cache_ttl: None,
            page_size: DEFAULT_PAGE_SIZE,
            fan_out: 4,
        }
    }
}

impl Client {
    /// Authenticate and create a client with default configuration
    pub async fn new(
        base_url: &str,
        client_id: &str,
        client_secret: SecretString,
    ) -> Result<Self, ApiError> {
        Self::with_config(base_url, client_id, client_secret, ClientConfig::default()).await
    }

    /// Authenticate and create a client with custom configuration
    pub async fn with_config(
        base_url: &str,
        client_id: &str,
        client_secret: SecretString,
        config: ClientConfig,
    ) -> Result<Self, ApiError> {
        if client_id.is_empty() || client_secret.expose_secret().is_empty() {
            return Err(ApiError::CredentialsRequired);
        }

        let base_url = normalize_base_url(base_url)?;
        let http_client = config.transport.build_client()?;
        let timeout_seconds = config.transport.request_timeout.as_secs();

        let token = auth::authenticate(
            &http_client,
            &base_url,
            client_id,
            &client_secret,
            timeout_seconds,
        )
        .await?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url,
                client_id: client_id.to_string(),
                client_secret,
                token: RwLock::new(token),
                rate_limiter: RateLimiter::new(&config.rate_limit),
                cache: ResponseCache::new(config.cache_ttl),
                stats: StatsRecorder::new(),
                config,
            }),
            cancel: CancellationToken::new(),
        })
    }

    /// A handle whose calls abort with [`ApiError::Cancelled`] once `token`
    /// fires, including between page fetches and while rate limited.
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            inner: self.inner.clone(),
            cancel: token,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub async fn stats(&self) -> RequestStats {
        self.inner.stats.snapshot().await
    }

    pub fn networks(&self) -> super::networks::NetworksApi<'_> {
        super::networks::NetworksApi::new(self)
    }

    pub fn connectors(&self) -> super::connectors::ConnectorsApi<'_> {
        super::connectors::ConnectorsApi::new(self)
    }

    pub fn routes(&self) -> super::routes::RoutesApi<'_> {
        super::routes::RoutesApi::new(self)
    }

    pub fn hosts(&self) -> super::hosts::HostsApi<'_> {
        super::hosts::HostsApi::new(self)
    }

    pub fn users(&self) -> super::users::UsersApi<'_> {
        super::users::UsersApi::new(self)
    }

    pub fn user_groups(&self) -> super::user_groups::UserGroupsApi<'_> {
        super::user_groups::UserGroupsApi::new(self)
    }

    pub fn dns_records(&self) -> super::dns_records::DnsRecordsApi<'_> {
        super::dns_records::DnsRecordsApi::new(self)
    }

    pub fn ip_services(&self) -> super::ip_services::IpServicesApi<'_> {
        super::ip_services::IpServicesApi::new(self)
    }

    pub fn vpn_regions(&self) -> super::vpn_regions::VpnRegionsApi<'_> {
        super::vpn_regions::VpnRegionsApi::new(self)
    }

    /// Execute a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.get_with_params(path, &ApiQueryParams::new()).await
    }

    /// Execute a GET request with query parameters
    pub async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ApiQueryParams,
    ) -> Result<T, ApiError> {
        let text = self.send(Method::GET, path, params, None).await?;
        decode(&text)
    }

    /// Fetch one page of a paginated collection
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        page: u32,
        size: u32,
    ) -> Result<PageResponse<T>, ApiError> {
        self.get_with_params(path, &ApiQueryParams::page(page, size))
            .await
    }

    /// Walk every page of a paginated collection
    pub async fn get_all_pages<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        pagination::collect_all(self.inner.config.page_size, move |page, size| {
            self.get_page(path, page, size)
        })
        .await
    }

    /// Walk every page and return the first element matching `predicate`
    pub async fn find_in_pages<T, P>(&self, path: &str, predicate: P) -> Result<Option<T>, ApiError>
    where
        T: DeserializeOwned,
        P: Fn(&T) -> bool,
    {
        let all: Vec<T> = self.get_all_pages(path).await?;
        Ok(all.into_iter().find(|item| predicate(item)))
    }

    /// Execute a POST request and decode the response body
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        params: &ApiQueryParams,
        body: &B,
    ) -> Result<T, ApiError> {
        let text = self.send(Method::POST, path, params, Some(encode(body)?)).await?;
        decode(&text)
    }

    /// Execute a body-less POST request and return the raw response text
    pub async fn post_text(&self, path: &str) -> Result<String, ApiError> {
        self.send(Method::POST, path, &ApiQueryParams::new(), None)
            .await
    }

    /// Execute a PUT request and decode the response body
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        params: &ApiQueryParams,
        body: &B,
    ) -> Result<T, ApiError> {
        let text = self.send(Method::PUT, path, params, Some(encode(body)?)).await?;
        decode(&text)
    }

    /// Execute a PUT request, ignoring whatever the server sends back
    pub async fn put_empty<B: Serialize>(
        &self,
        path: &str,
        params: &ApiQueryParams,
        body: &B,
    ) -> Result<(), ApiError> {
        self.send(Method::PUT, path, params, Some(encode(body)?))
            .await
            .map(|_| ())
    }

    /// Execute a DELETE request
    pub async fn delete(&self, path: &str, params: &ApiQueryParams) -> Result<(), ApiError> {
        self.send(Method::DELETE, path, params, None)
            .await
            .map(|_| ())
    }

    /// Rate-limited, authenticated round trip returning the response text.
    ///
    /// A 401 triggers one token refresh and one retry. The body is read to
    /// the end on every path so the connection goes back to the pool.
    async fn send(
        &self,
        method: Method,
        path: &str,
        params: &ApiQueryParams,
        body: Option<Vec<u8>>,
    ) -> Result<String, ApiError> {
        if self.cancel.is_cancelled() {
            return Err(ApiError::Cancelled);
        }

        let url = format!("{}{}{}", self.inner.base_url, path, params.to_query_string());
        let is_read = method == Method::GET;

        let generation = self.inner.cache.generation();
        if is_read {
            if let Some(cached) = self.inner.cache.get(&url).await {
                tracing::debug!("Cache hit for: {}", url);
                self.inner.stats.record_cache_hit().await;
                return Ok(cached);
            }
        } else {
            self.inner.cache.invalidate();
        }

        let timeout_seconds = self.inner.config.transport.request_timeout.as_secs();
        let mut refreshed = false;

        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(ApiError::Cancelled),
                _ = self.inner.rate_limiter.acquire() => {}
            }

            let (request, sent_token) = self.build_request(&method, &url, body.as_deref()).await;
            tracing::debug!("{} request to: {}", method, url);

            let exchange = async {
                let response = request.send().await?;
                let status = response.status();
                let text = response.text().await?;
                Ok::<_, reqwest::Error>((status, text))
            };

            let result = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(ApiError::Cancelled),
                result = exchange => result,
            };

            let (status, text) = match result {
                Ok(exchanged) => exchanged,
                Err(e) => {
                    self.inner.stats.record_request(false).await;
                    return Err(ApiError::from_transport(e, timeout_seconds));
                }
            };
            tracing::debug!("Response status: {}", status);

            if status.is_success() {
                self.inner.stats.record_request(true).await;
                if is_read {
                    self.inner.cache.insert(url, text.clone(), generation).await;
                } else {
                    self.inner.cache.invalidate();
                }
                return Ok(text);
            }

            self.inner.stats.record_request(false).await;

            if status == StatusCode::UNAUTHORIZED && !refreshed {
                tracing::warn!("Access token rejected for {}, re-authenticating", url);
                self.refresh_token(&sent_token).await?;
                refreshed = true;
                continue;
            }

            tracing::error!("API error response ({}): {}", status, text);
            return Err(ApiError::ApiError {
                status: status.as_u16(),
                body: text,
            });
        }
    }

    /// Request carrying the current bearer token, plus that token.
    async fn build_request(
        &self,
        method: &Method,
        url: &str,
        body: Option<&[u8]>,
    ) -> (reqwest::RequestBuilder, SecretString) {
        let token = self.inner.token.read().await.clone();
        let mut builder = self
            .inner
            .http_client
            .request(method.clone(), url)
            .bearer_auth(token.expose_secret())
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            builder = builder
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_vec());
        }

        (builder, token)
    }

    /// Replace `rejected` with a fresh token.
    ///
    /// The write lock is held across the exchange. Callers that were
    /// rejected with the same token queue behind it and then find the token
    /// already replaced, so a burst of 401s costs one exchange.
    async fn refresh_token(&self, rejected: &SecretString) -> Result<(), ApiError> {
        let mut token = self.inner.token.write().await;
        if token.expose_secret() != rejected.expose_secret() {
            tracing::debug!("Access token already refreshed");
            return Ok(());
        }

        *token = auth::authenticate(
            &self.inner.http_client,
            &self.inner.base_url,
            &self.inner.client_id,
            &self.inner.client_secret,
            self.inner.config.transport.request_timeout.as_secs(),
        )
        .await?;

        tracing::debug!("Access token refreshed");
        Ok(())
    }
}

fn normalize_base_url(raw: &str) -> Result<String, ApiError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let parsed =
        url::Url::parse(trimmed).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        scheme => Err(ApiError::InvalidUrl(format!(
            "{}: unsupported scheme {}",
            raw, scheme
        ))),
    }
}

fn encode<B: Serialize>(body: &B) -> Result<Vec<u8>, ApiError> {
    serde_json::to_vec(body).map_err(|e| ApiError::EncodeError(e.to_string()))
}

fn decode<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    serde_json::from_str(text).map_err(|e| {
        tracing::error!("Failed to deserialize response: {}, body: {}", e, text);
        ApiError::ParseError {
            message: e.to_string(),
            body: text.to_string(),
        }
    })
}
