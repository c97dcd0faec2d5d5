//! Background Tasks Module
//!
//! Contains background tasks that run periodically for the lifetime of a cache.
//!
//! # Tasks
//! - TTL Sweeper: Removes expired cache entries, stoppable on demand

mod sweeper;

pub use sweeper::{sweep_interval, Sweeper, MIN_SWEEP_INTERVAL};
