//! Homewatch Bot
//!
//! Watches a homework-review API for status changes and relays them to a
//! Telegram chat.
//!
//! Architecture:
//! - Configuration: credentials and tuning loaded from the environment
//! - Services: feed source and notifier traits over the HTTP clients
//! - Watch loop: poll, validate, notify, advance the cursor, sleep
//!
//! The watcher polls the review API on a fixed interval, maps each changed
//! homework to a verdict message, and sends it to the configured chat.
//! Operational failures are notified to the same chat, deduplicated across
//! iterations.

mod config;
mod service;
mod watch;

use anyhow::Result;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::service::{HttpStatusSource, TelegramNotifier};
use crate::watch::StatusWatcher;
use homewatch_client::{ReviewApiClient, TelegramBot};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "homewatch_bot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Homewatch Bot");

    // Pick up a local .env if present
    dotenvy::dotenv().ok();

    // Load configuration; without the credentials there is nothing to run
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Missing required configuration: {:#}. Shutting down.", e);
            return Err(e);
        }
    };
    config.validate()?;

    info!(
        "Loaded configuration: endpoint={}, chat_id={}, poll_interval={:?}",
        config.endpoint, config.telegram_chat_id, config.poll_interval
    );

    // Initialize clients
    let review_client = ReviewApiClient::new(&config.endpoint, &config.practicum_token);
    let bot = TelegramBot::new(&config.telegram_token);

    // Wire the services
    let source = Arc::new(HttpStatusSource::new(review_client));
    let notifier = Arc::new(TelegramNotifier::new(bot, &config.telegram_chat_id));

    info!("Clients initialized");

    // Start the watch loop
    let watcher = StatusWatcher::new(config.poll_interval, source, notifier);
    if let Err(e) = watcher.run().await {
        error!("Watcher error: {:#}", e);
        return Err(e);
    }

    Ok(())
}
