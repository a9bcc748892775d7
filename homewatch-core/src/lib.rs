//! Homewatch Core
//!
//! Core types and validation for the homework status watcher.
//!
//! This crate contains:
//! - Domain types: review statuses, homework records, the status feed
//! - Schema validation: shape checks over decoded API payloads

pub mod domain;
pub mod error;
pub mod schema;

pub use domain::{Homework, ReviewFeed, ReviewStatus};
pub use error::ValidationError;
