//! Notification delivery
//!
//! Sends rendered messages to the fixed destination chat. Delivery failures
//! are the caller's policy; implementations only report them.

use async_trait::async_trait;

use homewatch_client::{ClientError, TelegramBot};

/// Destination for watcher notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Attempts to deliver `text` to the destination chat
    async fn send(&self, text: &str) -> Result<(), ClientError>;
}

/// Telegram implementation of [`Notifier`] bound to one chat
pub struct TelegramNotifier {
    bot: TelegramBot,
    chat_id: String,
}

impl TelegramNotifier {
    /// Creates a notifier for a single chat
    ///
    /// # Arguments
    /// * `bot` - Configured Bot API client
    /// * `chat_id` - Destination chat identifier
    pub fn new(bot: TelegramBot, chat_id: impl Into<String>) -> Self {
        Self {
            bot,
            chat_id: chat_id.into(),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), ClientError> {
        self.bot.send_message(&self.chat_id, text).await
    }
}
