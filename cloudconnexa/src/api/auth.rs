//! OAuth2 client-credentials exchange

use reqwest::header::ACCEPT;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::common::API_PREFIX;
use super::error::ApiError;

/// Token endpoint response; only the bearer token is used.
#[derive(Deserialize)]
pub struct Credentials {
    pub access_token: SecretString,
}

pub fn token_path() -> String {
    format!("{}/oauth/token", API_PREFIX)
}

/// Exchange client credentials for a bearer token.
///
/// Empty credentials fail before anything is sent. No retry.
pub async fn authenticate(
    http: &reqwest::Client,
    base_url: &str,
    client_id: &str,
    client_secret: &SecretString,
    timeout_seconds: u64,
) -> Result<SecretString, ApiError> {
    if client_id.is_empty() || client_secret.expose_secret().is_empty() {
        return Err(ApiError::CredentialsRequired);
    }

    let url = format!("{}{}", base_url, token_path());
    tracing::debug!("Requesting access token from: {}", url);

    let response = http
        .post(&url)
        .basic_auth(client_id, Some(client_secret.expose_secret()))
        .header(ACCEPT, "application/json")
        .form(&[("grant_type", "client_credentials"), ("scope", "default")])
        .send()
        .await
        .map_err(|e| ApiError::from_transport(e, timeout_seconds))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| ApiError::from_transport(e, timeout_seconds))?;

    if !status.is_success() {
        tracing::error!("Token request rejected ({}): {}", status, text);
        return Err(ApiError::ApiError {
            status: status.as_u16(),
            body: text,
        });
    }

    let credentials: Credentials = serde_json::from_str(&text).map_err(|e| {
        tracing::error!("Failed to parse token response: {}", e);
        ApiError::ParseError {
            message: e.to_string(),
            body: text.clone(),
        }
    })?;

    Ok(credentials.access_token)
}
