//! LiveKit client error types

use serde::Deserialize;
use thiserror::Error;

/// Maximum response body size for RoomService calls (16 MB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum LiveKitError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Twirp error {code} ({status}): {msg}")]
    Twirp {
        status: reqwest::StatusCode,
        code: String,
        msg: String,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },
}

impl LiveKitError {
    /// True when the control plane reported that the room (or participant) does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Twirp { code, status, .. } => {
                code == "not_found" || *status == reqwest::StatusCode::NOT_FOUND
            }
            Self::Http { status, .. } => *status == reqwest::StatusCode::NOT_FOUND,
            _ => false,
        }
    }
}

/// Twirp error body: `{"code": "not_found", "msg": "..."}`
#[derive(Debug, Deserialize)]
struct TwirpErrorBody {
    code: String,
    #[serde(default)]
    msg: String,
}

/// Turn a non-2xx response into a `LiveKitError`, passing successful responses through.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, LiveKitError> {
    check_response_with_limit(resp, MAX_RESPONSE_SIZE).await
}

async fn check_response_with_limit(
    resp: reqwest::Response,
    limit: usize,
) -> Result<reqwest::Response, LiveKitError> {
    let status = resp.status();
    if !status.is_client_error() && !status.is_server_error() {
        return Ok(resp);
    }

    let url = resp.url().to_string();
    // An unreadable or oversized error body still reports the status
    let twirp = read_limited(resp, limit)
        .await
        .ok()
        .and_then(|bytes| serde_json::from_slice::<TwirpErrorBody>(&bytes).ok());

    match twirp {
        Some(body) => Err(LiveKitError::Twirp {
            status,
            code: body.code,
            msg: body.msg,
        }),
        None => Err(LiveKitError::Http { status, url }),
    }
}

/// Read a response body with size limit and deserialize as JSON.
pub async fn json_with_limit<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LiveKitError> {
    let bytes = read_limited(response, MAX_RESPONSE_SIZE).await?;
    serde_json::from_slice(&bytes).map_err(Into::into)
}

async fn read_limited(
    response: reqwest::Response,
    limit: usize,
) -> Result<bytes::Bytes, LiveKitError> {
    if let Some(cl) = response.content_length() {
        if cl > limit as u64 {
            return Err(LiveKitError::ResponseTooLarge { size: cl });
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > limit {
        return Err(LiveKitError::ResponseTooLarge { size: bytes.len() as u64 });
    }
    Ok(bytes)
}

impl From<reqwest::Error> for LiveKitError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for LiveKitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for LiveKitError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Self::Signing(err.to_string())
    }
}
