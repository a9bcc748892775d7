//! Telegram Bot API client
//!
//! Covers the single method the watcher needs: `sendMessage` to one chat.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, Result};

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Request body for the `sendMessage` method
#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// The slice of a Bot API answer the watcher cares about
#[derive(Debug, Deserialize)]
struct ApiAnswer {
    ok: bool,
    description: Option<String>,
}

/// Client for the Telegram Bot API
#[derive(Debug, Clone)]
pub struct TelegramBot {
    /// Bot API base URL, without the `/bot<token>` segment
    base_url: String,
    /// Bot token issued by BotFather
    token: String,
    /// HTTP client instance
    client: Client,
}

impl TelegramBot {
    /// Create a new bot client against the public Bot API
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(TELEGRAM_API_BASE, token)
    }

    /// Create a bot client against a custom base URL
    ///
    /// Useful for local Bot API servers and tests.
    pub fn with_base_url(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Send a text message to a chat
    ///
    /// # Arguments
    /// * `chat_id` - Destination chat identifier
    /// * `text` - UTF-8 message text
    pub async fn send_message(&self, chat_id: &str, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.base_url, self.token);
        let response = self
            .client
            .post(&url)
            .json(&SendMessage { chat_id, text })
            .send()
            .await?;

        let status = response.status();
        let answer: ApiAnswer = response
            .json()
            .await
            .map_err(|e| ClientError::Parse(format!("failed to decode Bot API answer: {e}")))?;

        if !status.is_success() || !answer.ok {
            return Err(ClientError::Telegram {
                status: status.as_u16(),
                description: answer
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }

        debug!("Telegram accepted message for chat {}", chat_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bot_trims_trailing_slash() {
        let bot = TelegramBot::with_base_url("http://localhost:8081/", "token");
        assert_eq!(bot.base_url, "http://localhost:8081");
    }

    #[test]
    fn test_default_base_url_is_public_api() {
        let bot = TelegramBot::new("token");
        assert_eq!(bot.base_url, TELEGRAM_API_BASE);
    }
}
