//! TTL Cache - An in-memory cache with touch-on-read expiration
//!
//! Entries expire a fixed TTL after their last write or successful read, a
//! background sweeper reclaims expired entries, and an append mode lets a key
//! accumulate a sequence of values. An HTTP API exposes the cache over JSON.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{Payload, TtlCache};
pub use config::Config;
pub use error::{CacheError, Result};
