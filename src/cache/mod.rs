//! Cache Module
//!
//! Provides an in-memory cache where entries expire a fixed TTL after their
//! last touch, with an append mode that accumulates values under one key.

mod entry;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use entry::{clamp_ttl, CacheEntry, Payload, MAX_TTL};
pub use stats::CacheStats;
pub use store::CacheStore;
pub use ttl::TtlCache;
