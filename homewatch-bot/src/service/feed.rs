//! Status feed source
//!
//! Fetches raw status payloads from the review API. The trait returns the
//! decoded JSON value untouched; shape validation belongs to the watch loop
//! so that structural errors surface as chat notifications.

use async_trait::async_trait;
use serde_json::Value;

use homewatch_client::{ClientError, ReviewApiClient};

/// Source of homework status updates
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches status updates that happened after `from_date`
    ///
    /// # Arguments
    /// * `from_date` - Unix timestamp cursor from the previous poll
    async fn fetch(&self, from_date: i64) -> Result<Value, ClientError>;
}

/// HTTP implementation of [`StatusSource`] backed by the review API
pub struct HttpStatusSource {
    client: ReviewApiClient,
}

impl HttpStatusSource {
    /// Creates a source over a configured review API client
    pub fn new(client: ReviewApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusSource for HttpStatusSource {
    async fn fetch(&self, from_date: i64) -> Result<Value, ClientError> {
        self.client.homework_statuses(from_date).await
    }
}
