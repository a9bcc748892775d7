//! Core domain types
//!
//! The fundamental entities of the watcher: the closed set of review
//! statuses, a single homework record, and the feed returned by one poll.

pub mod homework;

pub use homework::{Homework, ReviewFeed, ReviewStatus};
