//! Cache Entry Module
//!
//! Defines the stored payload and the expiration bookkeeping of a single entry.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

/// Longest lifetime an entry can be given, about 30 years.
///
/// Larger TTLs are clamped to this so deadlines stay representable.
pub const MAX_TTL: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Clamps `ttl` to `MAX_TTL`.
pub fn clamp_ttl(ttl: Duration) -> Duration {
    ttl.min(MAX_TTL)
}

fn deadline(now: Instant, ttl: Duration) -> Instant {
    now.checked_add(ttl).unwrap_or_else(|| now + MAX_TTL)
}

// == Payload ==
/// Value held by a cache entry.
///
/// `set` writes a `Single`, `add_to_slice` builds a `Sequence`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Payload<V> {
    /// A whole value stored by `set`
    Single(V),
    /// Values accumulated by `add_to_slice`, oldest first
    Sequence(Vec<V>),
}

impl<V> Payload<V> {
    /// Returns the value if this is a `Single` payload.
    pub fn as_single(&self) -> Option<&V> {
        match self {
            Payload::Single(value) => Some(value),
            Payload::Sequence(_) => None,
        }
    }

    /// Returns the accumulated values if this is a `Sequence` payload.
    pub fn as_sequence(&self) -> Option<&[V]> {
        match self {
            Payload::Single(_) => None,
            Payload::Sequence(values) => Some(values),
        }
    }

    /// Consumes the payload, returning its values in order.
    pub fn into_vec(self) -> Vec<V> {
        match self {
            Payload::Single(value) => vec![value],
            Payload::Sequence(values) => values,
        }
    }
}

// == Cache Entry ==
/// Represents a single cache entry with its payload and deadline.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload
    pub payload: Payload<V>,
    /// Absolute deadline after which the entry is treated as absent
    pub expires_at: Instant,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` after `now`.
    pub fn new(payload: Payload<V>, ttl: Duration, now: Instant) -> Self {
        Self {
            payload,
            expires_at: deadline(now, ttl),
        }
    }

    // == Touch ==
    /// Resets the deadline to `now + ttl`.
    ///
    /// The clock restarts from `now`; remaining lifetime is never carried over.
    pub fn touch(&mut self, ttl: Duration, now: Instant) {
        self.expires_at = deadline(now, ttl);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is expired once `now >= expires_at`, so
    /// a zero TTL entry is expired as soon as it is written.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    // == Time To Live ==
    /// Returns the remaining lifetime at `now`, zero once expired.
    pub fn ttl_remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
