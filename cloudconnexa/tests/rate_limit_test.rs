//! Request pacing as observed by the server

mod common;

use cloudconnexa::api::{ClientConfig, RateLimitConfig};
use common::*;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Arrival jitter allowed between the limiter releasing a request and the
/// server accepting it.
const SLACK: Duration = Duration::from_millis(30);

#[tokio::test]
async fn concurrent_walks_never_outrun_the_bucket() {
    let arrivals = Arc::new(Mutex::new(Vec::new()));
    let url = {
        let arrivals = arrivals.clone();
        stub_server(move |request: StubRequest| {
            let arrivals = arrivals.clone();
            async move {
                if request.path() == TOKEN_PATH {
                    return stub_token();
                }
                arrivals.lock().unwrap().push(Instant::now());
                (200, page_body(&[], 0, 10, 0))
            }
        })
        .await
    };

    let interval = Duration::from_millis(100);
    let burst = 2;
    let config = ClientConfig {
        rate_limit: RateLimitConfig::new(interval, burst),
        ..ClientConfig::default()
    };
    let client = stub_client(&url, config).await;

    let walks: Vec<_> = (0..6)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.networks().list_all().await })
        })
        .collect();
    for walk in walks {
        assert!(walk.await.unwrap().unwrap().is_empty());
    }

    let mut seen = arrivals.lock().unwrap().clone();
    seen.sort();
    assert_eq!(seen.len(), 6);

    // the burst goes out back to back
    assert!(seen[burst as usize - 1].duration_since(seen[0]) < interval);

    // after that, one request per interval at most
    for (i, at) in seen.iter().enumerate().skip(burst as usize) {
        let earliest = interval * (i as u32 + 1 - burst);
        let elapsed = at.duration_since(seen[0]);
        assert!(
            elapsed + SLACK >= earliest,
            "request {} arrived after {:?}, expected at least {:?}",
            i,
            elapsed,
            earliest
        );
    }
}

#[tokio::test]
async fn token_exchange_does_not_consume_the_bucket() {
    let arrivals = Arc::new(Mutex::new(Vec::new()));
    let url = {
        let arrivals = arrivals.clone();
        stub_server(move |request: StubRequest| {
            let arrivals = arrivals.clone();
            async move {
                if request.path() == TOKEN_PATH {
                    return stub_token();
                }
                arrivals.lock().unwrap().push(Instant::now());
                (200, page_body(&[], 0, 10, 0))
            }
        })
        .await
    };

    let config = ClientConfig {
        rate_limit: RateLimitConfig::new(Duration::from_secs(60), 1),
        ..ClientConfig::default()
    };
    let client = stub_client(&url, config).await;

    let started = Instant::now();
    client.networks().list_all().await.unwrap();

    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(arrivals.lock().unwrap().len(), 1);
}
