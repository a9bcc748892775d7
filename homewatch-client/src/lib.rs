//! Homewatch HTTP Clients
//!
//! Thin, type-safe HTTP clients for the two external services the watcher
//! talks to: the homework-review API (polled) and the Telegram Bot API
//! (notified).
//!
//! # Example
//!
//! ```no_run
//! use homewatch_client::ReviewApiClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), homewatch_client::ClientError> {
//!     let client = ReviewApiClient::new(
//!         "https://practicum.yandex.ru/api/user_api/homework_statuses/",
//!         "api-token",
//!     );
//!
//!     let payload = client.homework_statuses(0).await?;
//!     println!("feed: {payload}");
//!     Ok(())
//! }
//! ```

pub mod error;
mod review;
mod telegram;

pub use error::{ClientError, Result};
pub use review::ReviewApiClient;
pub use telegram::TelegramBot;
