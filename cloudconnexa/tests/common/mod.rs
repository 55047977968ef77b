//! Shared fixtures for the mock-server tests
#![allow(dead_code)]

use cloudconnexa::api::{Client, ClientConfig, RateLimitConfig};
use mockito::{Matcher, Mock, ServerGuard};
use secrecy::SecretString;
use serde_json::{json, Value};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};

pub const TOKEN_PATH: &str = "/api/beta/oauth/token";
pub const TOKEN: &str = "test-access-token";
/// base64("test-id:test-secret")
pub const BASIC_AUTH: &str = "Basic dGVzdC1pZDp0ZXN0LXNlY3JldA==";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Token endpoint accepting the test credentials exactly once.
pub async fn mock_token(server: &mut ServerGuard) -> Mock {
    server
        .mock("POST", TOKEN_PATH)
        .match_header("authorization", BASIC_AUTH)
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "client_credentials".into()),
            Matcher::UrlEncoded("scope".into(), "default".into()),
        ]))
        .with_header("content-type", "application/json")
        .with_body(json!({"access_token": TOKEN, "token_type": "bearer"}).to_string())
        .create_async()
        .await
}

/// No practical rate limiting, so tests run at full speed.
pub fn fast_config() -> ClientConfig {
    ClientConfig {
        rate_limit: RateLimitConfig::new(Duration::from_millis(1), 100),
        ..ClientConfig::default()
    }
}

pub async fn client_with(server: &ServerGuard, config: ClientConfig) -> Client {
    Client::with_config(
        &server.url(),
        "test-id",
        SecretString::from("test-secret".to_string()),
        config,
    )
    .await
    .expect("client should authenticate against the mock server")
}

pub async fn test_client(server: &mut ServerGuard) -> Client {
    init_tracing();
    let _token = mock_token(server).await;
    client_with(server, fast_config()).await
}

pub fn page_query(page: u32, size: u32) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("page".into(), page.to_string()),
        Matcher::UrlEncoded("size".into(), size.to_string()),
    ])
}

/// `/page` envelope for one slice of `items`.
pub fn page_body(items: &[Value], page: u32, size: u32, total_pages: u32) -> String {
    let content: Vec<Value> = items
        .iter()
        .skip((page * size) as usize)
        .take(size as usize)
        .cloned()
        .collect();

    json!({
        "content": content,
        "numberOfElements": content.len(),
        "page": page,
        "size": size,
        "success": true,
        "totalElements": items.len(),
        "totalPages": total_pages,
    })
    .to_string()
}

/// Serve every page of `items` under `path`, each expected exactly `hits` times.
pub async fn mock_pages(
    server: &mut ServerGuard,
    path: &str,
    items: &[Value],
    size: u32,
    hits: usize,
) -> Vec<Mock> {
    let total_pages = (items.len() as u32).div_ceil(size);
    let mut mocks = Vec::new();
    for page in 0..total_pages.max(1) {
        let mock = server
            .mock("GET", path)
            .match_query(page_query(page, size))
            .match_header("authorization", format!("Bearer {}", TOKEN).as_str())
            .with_header("content-type", "application/json")
            .with_body(page_body(items, page, size, total_pages))
            .expect(hits)
            .create_async()
            .await;
        mocks.push(mock);
    }
    mocks
}

/// One request as seen by [`stub_server`].
#[derive(Debug, Clone)]
pub struct StubRequest {
    pub method: String,
    /// Path including any query string.
    pub target: String,
    pub body: String,
}

impl StubRequest {
    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or("")
    }
}

/// Bare HTTP/1.1 server for behavior mockito cannot express, such as a
/// response that is held back while other requests are served. The handler
/// returns `(status, body)`; every connection is closed after one exchange.
pub async fn stub_server<F, Fut>(handler: F) -> String
where
    F: Fn(StubRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let handler = Arc::new(handler);

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            let handler = handler.clone();
            tokio::spawn(async move {
                let _ = serve_one(stream, handler.as_ref()).await;
            });
        }
    });

    url
}

async fn serve_one<F, Fut>(stream: TcpStream, handler: &F) -> std::io::Result<()>
where
    F: Fn(StubRequest) -> Fut,
    Fut: Future<Output = (u16, String)>,
{
    let mut reader = BufReader::new(stream);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).await?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or_default().to_string();
    let target = parts.next().unwrap_or_default().to_string();

    let mut content_length = 0;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 || line == "\r\n" {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().unwrap_or(0);
            }
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).await?;

    let (status, body) = handler(StubRequest {
        method,
        target,
        body: String::from_utf8_lossy(&body).into_owned(),
    })
    .await;

    let response = format!(
        "HTTP/1.1 {} Stub\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );
    let mut stream = reader.into_inner();
    stream.write_all(response.as_bytes()).await?;
    stream.shutdown().await
}

/// Token endpoint answer for [`stub_server`] handlers.
pub fn stub_token() -> (u16, String) {
    (200, json!({"access_token": TOKEN, "token_type": "bearer"}).to_string())
}

pub async fn stub_client(url: &str, config: ClientConfig) -> Client {
    Client::with_config(
        url,
        "test-id",
        SecretString::from("test-secret".to_string()),
        config,
    )
    .await
    .expect("client should authenticate against the stub server")
}
