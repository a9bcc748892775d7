//! Status watcher
//!
//! Polls the review API for homework status changes and notifies the chat.
//! One iteration fetches the feed with the current cursor, validates its
//! shape, renders a notification per changed homework, and advances the
//! cursor to the server's reported time. Poll and validation failures become
//! chat notifications themselves, deduplicated across iterations so a broken
//! API does not flood the chat every poll.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use tokio::time;
use tracing::{debug, error, info};

use homewatch_core::{ReviewFeed, schema};

use crate::service::{Notifier, StatusSource};

/// Prefix of every error notification sent to the chat
const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// Mutable loop state: the poll cursor and the last notified error text
#[derive(Debug, Clone)]
pub struct WatchState {
    /// Unix timestamp sent as `from_date` on the next poll
    pub cursor: i64,
    /// Text of the last error notification, used to suppress repeats
    pub last_error: Option<String>,
}

impl WatchState {
    /// Creates state with a cursor at `cursor` and no remembered error
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            last_error: None,
        }
    }

    /// Creates state with the cursor at the current wall-clock time
    pub fn now() -> Self {
        Self::new(Utc::now().timestamp())
    }
}

/// Status watcher that continuously polls for homework status changes
pub struct StatusWatcher {
    poll_interval: Duration,
    source: Arc<dyn StatusSource>,
    notifier: Arc<dyn Notifier>,
}

impl StatusWatcher {
    /// Creates a new watcher
    pub fn new(
        poll_interval: Duration,
        source: Arc<dyn StatusSource>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            poll_interval,
            source,
            notifier,
        }
    }

    /// Starts the polling loop
    ///
    /// Runs until the process terminates; there is no terminal state.
    pub async fn run(&self) -> Result<()> {
        info!(
            "Starting status watcher (interval: {:?})",
            self.poll_interval
        );

        let mut state = WatchState::now();
        let mut interval = time::interval(self.poll_interval);

        loop {
            interval.tick().await;

            debug!("Polling for homework status updates");
            self.tick(&mut state).await;
        }
    }

    /// Performs a single poll cycle
    ///
    /// On success the cursor advances to the feed's `current_date`. On
    /// failure the cursor is left untouched and the formatted error is
    /// notified, unless the identical text was already sent.
    pub async fn tick(&self, state: &mut WatchState) {
        match self.poll_once(state.cursor).await {
            Ok(feed) => {
                if feed.is_empty() {
                    debug!("Homework statuses did not change");
                } else {
                    for homework in &feed.homeworks {
                        self.notify(&homework.notification()).await;
                    }
                }
                state.cursor = feed.current_date;
            }
            Err(e) => {
                let message = format!("{FAILURE_PREFIX}{e:#}");
                error!("{}", message);
                if state.last_error.as_deref() != Some(message.as_str()) {
                    self.notify(&message).await;
                    state.last_error = Some(message);
                }
            }
        }
    }

    /// Fetches and validates one feed
    async fn poll_once(&self, cursor: i64) -> Result<ReviewFeed> {
        let payload = self.source.fetch(cursor).await?;
        let feed = schema::check_feed(&payload)?;

        debug!(
            "Fetched feed with {} update(s), server time {}",
            feed.homeworks.len(),
            feed.current_date
        );

        Ok(feed)
    }

    /// Attempts delivery; failures are logged and never propagated
    async fn notify(&self, text: &str) {
        match self.notifier.send(text).await {
            Ok(()) => info!("Sent notification to chat: \"{}\"", text),
            Err(e) => error!("Failed to deliver notification: {:#}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homewatch_core::ReviewStatus;
    use homewatch_client::ClientError;
    use async_trait::async_trait;
    use serde_json::{Value, json};
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Source fed from a queue of canned outcomes, recording each cursor
    struct ScriptedSource {
        responses: Mutex<VecDeque<Result<Value, ClientError>>>,
        cursors: Mutex<Vec<i64>>,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Value, ClientError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                cursors: Mutex::new(Vec::new()),
            })
        }

        fn cursors(&self) -> Vec<i64> {
            self.cursors.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StatusSource for ScriptedSource {
        async fn fetch(&self, from_date: i64) -> Result<Value, ClientError> {
            self.cursors.lock().unwrap().push(from_date);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(json!({"homeworks": [], "current_date": 0})))
        }
    }

    /// Notifier that records sent texts and can be told to fail
    struct RecordingNotifier {
        sent: Mutex<Vec<String>>,
        fail: bool,
    }

    impl RecordingNotifier {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                sent: Mutex::new(Vec::new()),
                fail: true,
            })
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, text: &str) -> Result<(), ClientError> {
            if self.fail {
                return Err(ClientError::Telegram {
                    status: 400,
                    description: "chat not found".to_string(),
                });
            }
            self.sent.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    fn watcher(source: Arc<ScriptedSource>, notifier: Arc<RecordingNotifier>) -> StatusWatcher {
        StatusWatcher::new(Duration::from_secs(600), source, notifier)
    }

    fn server_error() -> ClientError {
        ClientError::endpoint(500, "http://localhost:9000/statuses/")
    }

    #[tokio::test]
    async fn test_status_change_is_notified_and_cursor_advances() {
        let source = ScriptedSource::new(vec![Ok(json!({
            "homeworks": [{"status": "approved", "homework_name": "hw1"}],
            "current_date": 1000
        }))]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(0);
        watcher.tick(&mut state).await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("hw1"));
        assert!(sent[0].contains(ReviewStatus::Approved.verdict()));
        assert_eq!(state.cursor, 1000);
    }

    #[tokio::test]
    async fn test_empty_feed_sends_nothing_but_advances_cursor() {
        let source = ScriptedSource::new(vec![Ok(json!({
            "homeworks": [],
            "current_date": 1000
        }))]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(0);
        watcher.tick(&mut state).await;

        assert!(notifier.sent().is_empty());
        assert_eq!(state.cursor, 1000);
    }

    #[tokio::test]
    async fn test_next_poll_uses_previous_current_date() {
        let source = ScriptedSource::new(vec![
            Ok(json!({"homeworks": [], "current_date": 1000})),
            Ok(json!({"homeworks": [], "current_date": 2000})),
        ]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(5);
        watcher.tick(&mut state).await;
        watcher.tick(&mut state).await;

        assert_eq!(source.cursors(), vec![5, 1000]);
        assert_eq!(state.cursor, 2000);
    }

    #[tokio::test]
    async fn test_transport_error_is_notified_and_cursor_unchanged() {
        let source = ScriptedSource::new(vec![Err(server_error())]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(5);
        watcher.tick(&mut state).await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with(FAILURE_PREFIX));
        assert!(sent[0].contains("500"));
        assert_eq!(state.cursor, 5);
    }

    #[tokio::test]
    async fn test_repeated_identical_error_notifies_once() {
        let source = ScriptedSource::new(vec![Err(server_error()), Err(server_error())]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(5);
        watcher.tick(&mut state).await;
        watcher.tick(&mut state).await;

        assert_eq!(notifier.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_different_error_texts_both_notify() {
        let source = ScriptedSource::new(vec![
            Err(server_error()),
            Err(ClientError::endpoint(404, "http://localhost:9000/statuses/")),
        ]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(5);
        watcher.tick(&mut state).await;
        watcher.tick(&mut state).await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert_ne!(sent[0], sent[1]);
    }

    #[tokio::test]
    async fn test_malformed_feed_is_notified_naming_the_field() {
        let source = ScriptedSource::new(vec![Ok(json!({"current_date": 1000}))]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(5);
        watcher.tick(&mut state).await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("homeworks"));
        assert_eq!(state.cursor, 5);
    }

    #[tokio::test]
    async fn test_undocumented_status_is_notified() {
        let source = ScriptedSource::new(vec![Ok(json!({
            "homeworks": [{"status": "lost", "homework_name": "hw1"}],
            "current_date": 1000
        }))]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(5);
        watcher.tick(&mut state).await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].contains("lost"));
    }

    #[tokio::test]
    async fn test_delivery_failure_does_not_disrupt_the_loop() {
        let source = ScriptedSource::new(vec![Ok(json!({
            "homeworks": [{"status": "rejected", "homework_name": "hw1"}],
            "current_date": 1000
        }))]);
        let notifier = RecordingNotifier::failing();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(5);
        watcher.tick(&mut state).await;

        // Delivery failed, but the cycle still completed and advanced
        assert!(notifier.sent().is_empty());
        assert_eq!(state.cursor, 1000);
    }

    #[tokio::test]
    async fn test_error_then_success_resumes_normally() {
        let source = ScriptedSource::new(vec![
            Err(server_error()),
            Ok(json!({
                "homeworks": [{"status": "reviewing", "homework_name": "hw2"}],
                "current_date": 3000
            })),
        ]);
        let notifier = RecordingNotifier::new();
        let watcher = watcher(Arc::clone(&source), Arc::clone(&notifier));

        let mut state = WatchState::new(5);
        watcher.tick(&mut state).await;
        watcher.tick(&mut state).await;

        let sent = notifier.sent();
        assert_eq!(sent.len(), 2);
        assert!(sent[1].contains("hw2"));
        assert!(sent[1].contains(ReviewStatus::Reviewing.verdict()));
        assert_eq!(state.cursor, 3000);
    }
}
