use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("client id and client secret are required")]
    CredentialsRequired,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("Request timeout after {0} seconds")]
    Timeout(u64),

    /// Non-2xx response. The body is kept verbatim since the API does not
    /// emit typed error codes.
    #[error("API returned error (HTTP {status}): {body}")]
    ApiError { status: u16, body: String },

    #[error("Failed to parse response: {message}")]
    ParseError { message: String, body: String },

    #[error("Failed to encode request body: {0}")]
    EncodeError(String),

    #[error("Request cancelled")]
    Cancelled,
}

impl ApiError {
    pub(crate) fn from_transport(err: reqwest::Error, timeout_seconds: u64) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(timeout_seconds)
        } else {
            ApiError::RequestError(err)
        }
    }

    /// HTTP status of a rejected call, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
