//! Review API client
//!
//! Handles the single endpoint the watcher polls: homework statuses changed
//! since a cursor timestamp.

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};

/// HTTP client for the homework-review API
///
/// Authenticates with an `Authorization: OAuth <token>` header and queries
/// updates with a `from_date` unix-timestamp parameter.
#[derive(Debug, Clone)]
pub struct ReviewApiClient {
    /// Full URL of the homework-statuses endpoint
    endpoint: String,
    /// API token sent with every request
    token: String,
    /// HTTP client instance
    client: Client,
}

impl ReviewApiClient {
    /// Create a new review API client
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the homework-statuses endpoint
    /// * `token` - API token for the `OAuth` authorization scheme
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Create a client with a custom HTTP client
    ///
    /// Allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            client,
        }
    }

    /// Get the endpoint URL this client polls
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch homework status updates since `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp cursor; only updates after this instant
    ///   are returned
    ///
    /// # Returns
    /// The decoded JSON body. Shape validation is the caller's concern; the
    /// client only guarantees a 200 answer and a decodable body.
    pub async fn homework_statuses(&self, from_date: i64) -> Result<Value> {
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ClientError::endpoint(status.as_u16(), &self.endpoint));
        }

        debug!("Review API answered with status {}", status);

        response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("failed to decode review API body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_keeps_endpoint() {
        let client = ReviewApiClient::new("http://localhost:9000/statuses/", "token");
        assert_eq!(client.endpoint(), "http://localhost:9000/statuses/");
    }

    #[test]
    fn test_client_with_custom_http_client() {
        let http_client = Client::new();
        let client =
            ReviewApiClient::with_client("http://localhost:9000/statuses/", "token", http_client);
        assert_eq!(client.endpoint(), "http://localhost:9000/statuses/");
    }
}
