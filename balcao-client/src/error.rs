//! Client error types
//!
//! Transport failures (connection refused, timeout) are classified apart
//! from HTTP-level rejections so the operator sees "helper unreachable"
//! rather than a generic request error.

use serde::Deserialize;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// The peer could not be reached at all (status-0-like failure)
    #[error("service unreachable: {0}")]
    Unreachable(String),

    /// The peer answered with an HTTP error
    #[error("request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    /// Response body could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Any other transport-level failure
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            ClientError::Unreachable(e.to_string())
        } else if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else {
            ClientError::Http(e.to_string())
        }
    }
}

impl ClientError {
    /// True when the failure means the peer never answered
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Unreachable(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

/// Error body shape both services use (`{"message": "..."}`)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Turn a non-success response into a [`ClientError::Rejected`], pulling the
/// message out of the JSON body when one is present.
pub(crate) async fn rejection(resp: reqwest::Response) -> ClientError {
    let status = resp.status().as_u16();
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .map(|b| b.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"));
    ClientError::Rejected { status, message }
}
