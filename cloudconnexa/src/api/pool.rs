//! HTTP transport construction and per-client request accounting

use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_idle_connections: usize,
    pub tcp_keepalive: Option<Duration>,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(90),
            max_idle_connections: 10,
            tcp_keepalive: Some(Duration::from_secs(30)),
            user_agent: format!("cloudconnexa-rs/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl TransportConfig {
    pub fn build_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder()
            .user_agent(self.user_agent.clone())
            .timeout(self.request_timeout)
            .connect_timeout(self.connect_timeout)
            .pool_idle_timeout(self.idle_timeout)
            .pool_max_idle_per_host(self.max_idle_connections);

        if let Some(keepalive) = self.tcp_keepalive {
            builder = builder.tcp_keepalive(keepalive);
        }

        builder.build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestStats {
    /// Calls that reached the network, token exchanges excluded.
    pub total_requests: u64,
    pub failed_requests: u64,
    pub cache_hits: u64,
    pub last_request: Option<Instant>,
}

#[derive(Default)]
pub struct StatsRecorder {
    stats: RwLock<RequestStats>,
}

impl StatsRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn record_request(&self, success: bool) {
        let mut stats = self.stats.write().await;
        stats.total_requests += 1;
        if !success {
            stats.failed_requests += 1;
        }
        stats.last_request = Some(Instant::now());
    }

    pub async fn record_cache_hit(&self) {
        self.stats.write().await.cache_hits += 1;
    }

    pub async fn snapshot(&self) -> RequestStats {
        self.stats.read().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_defaults() {
        let config = TransportConfig::default();
        assert_eq!(config.request_timeout.as_secs(), 30);
        assert_eq!(config.connect_timeout.as_secs(), 10);
        assert_eq!(config.idle_timeout.as_secs(), 90);
        assert_eq!(config.max_idle_connections, 10);
        assert_eq!(config.tcp_keepalive, Some(Duration::from_secs(30)));
        assert!(config.user_agent.starts_with("cloudconnexa-rs/"));
        assert!(config.build_client().is_ok());
    }

    #[tokio::test]
    async fn stats_track_failures_and_cache_hits() {
        let recorder = StatsRecorder::new();

        let stats = recorder.snapshot().await;
        assert_eq!(stats.total_requests, 0);
        assert!(stats.last_request.is_none());

        recorder.record_request(true).await;
        recorder.record_request(false).await;
        recorder.record_cache_hit().await;

        let stats = recorder.snapshot().await;
        assert_eq!(stats.total_requests, 2);
        assert_eq!(stats.failed_requests, 1);
        assert_eq!(stats.cache_hits, 1);
        assert!(stats.last_request.is_some());
    }
}
