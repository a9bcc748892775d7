//! Watcher configuration
//!
//! Loads the three required credentials and the optional tuning knobs from
//! the environment. Missing credentials are fatal at startup; the process
//! must not enter the watch loop without them.

use std::time::Duration;

/// Default homework-statuses endpoint
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Default delay between polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

/// Watcher configuration
///
/// Constructed once from the environment at startup and read-only afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    /// Review API token (`PRACTICUM_TOKEN`)
    pub practicum_token: String,

    /// Telegram bot token (`TELEGRAM_TOKEN`)
    pub telegram_token: String,

    /// Destination chat identifier (`TELEGRAM_CHAT_ID`)
    pub telegram_chat_id: String,

    /// Full URL of the homework-statuses endpoint
    pub endpoint: String,

    /// How long to sleep between polls
    pub poll_interval: Duration,
}

impl Config {
    /// Creates configuration from environment variables
    ///
    /// Required:
    /// - PRACTICUM_TOKEN
    /// - TELEGRAM_TOKEN
    /// - TELEGRAM_CHAT_ID
    ///
    /// Optional:
    /// - HOMEWORK_ENDPOINT (default: the public review API)
    /// - POLL_INTERVAL (seconds, default: 600)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Creates configuration from an arbitrary variable lookup
    ///
    /// `from_env` is this with `std::env::var`; tests supply their own maps.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .ok_or_else(|| anyhow::anyhow!("{} environment variable not set", name))
        };

        let practicum_token = required("PRACTICUM_TOKEN")?;
        let telegram_token = required("TELEGRAM_TOKEN")?;
        let telegram_chat_id = required("TELEGRAM_CHAT_ID")?;

        let endpoint = lookup("HOMEWORK_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

        let poll_interval = lookup("POLL_INTERVAL")
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_POLL_INTERVAL);

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            poll_interval,
        })
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.practicum_token.is_empty() {
            anyhow::bail!("practicum_token cannot be empty");
        }

        if self.telegram_token.is_empty() {
            anyhow::bail!("telegram_token cannot be empty");
        }

        if self.telegram_chat_id.is_empty() {
            anyhow::bail!("telegram_chat_id cannot be empty");
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            anyhow::bail!("endpoint must start with http:// or https://");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }
}
