//! Error types for the homewatch clients

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the review API or Telegram
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a status code was received
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The review endpoint answered with a non-OK status
    #[error("endpoint {url} is unavailable, server answered with status {status}")]
    Endpoint {
        /// HTTP status code
        status: u16,
        /// The endpoint that was queried
        url: String,
    },

    /// Telegram rejected the message
    #[error("Telegram API error (status {status}): {description}")]
    Telegram {
        /// HTTP status code
        status: u16,
        /// Error description from the Bot API, if any
        description: String,
    },

    /// Failed to decode a response body
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl ClientError {
    /// Create an endpoint error from a status code and URL
    pub fn endpoint(status: u16, url: impl Into<String>) -> Self {
        Self::Endpoint {
            status,
            url: url.into(),
        }
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            Self::Endpoint { status, .. } | Self::Telegram { status, .. } if *status >= 500
        )
    }
}
