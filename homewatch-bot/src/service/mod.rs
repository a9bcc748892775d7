//! Service layer
//!
//! Seams between the watch loop and the outside world. Both external calls
//! sit behind traits so the loop can be exercised in tests with recording
//! fakes instead of live HTTP.

mod feed;
mod notify;

// Re-export traits
pub use feed::StatusSource;
pub use notify::Notifier;

// Re-export implementations
pub use feed::HttpStatusSource;
pub use notify::TelegramNotifier;
