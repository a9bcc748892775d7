//! Watch loop
//!
//! Polls the review API on a fixed interval and relays status changes to the
//! destination chat.

mod watcher;

pub use watcher::{StatusWatcher, WatchState};
