//! Cache Store Module
//!
//! Entry map with access-extends-life semantics. Not synchronized on its own;
//! `TtlCache` wraps it in a lock and drives the sweeper against it.

use std::collections::HashMap;
use std::fmt::Debug;
use std::time::Duration;

use tokio::time::Instant;
use tracing::info;

use crate::cache::{clamp_ttl, CacheEntry, CacheStats, Payload};
use crate::error::{CacheError, Result};

// == Cache Store ==
/// Key-value storage where every entry expires `ttl` after its last touch.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Lookup and sweep statistics
    stats: CacheStats,
    /// Lifetime given to every entry on write and on touch
    ttl: Duration,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates an empty store whose entries live for `ttl` after each touch.
    ///
    /// TTLs above `MAX_TTL` are clamped to it.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl: clamp_ttl(ttl),
        }
    }

    /// Returns the lifetime applied to entries.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Set ==
    /// Stores `value` under `key`, replacing any previous payload
    /// (including an accumulated sequence) and resetting the deadline.
    pub fn set(&mut self, key: String, value: V) {
        let entry = CacheEntry::new(Payload::Single(value), self.ttl, Instant::now());
        self.entries.insert(key, entry);
    }

    // == Get ==
    /// Retrieves a copy of the payload stored under `key`.
    ///
    /// A live entry is touched before returning, so every successful read
    /// extends its life by a full TTL. Expired entries are reported as absent
    /// and left for the sweeper.
    pub fn get(&mut self, key: &str) -> Option<Payload<V>> {
        let now = Instant::now();
        match self.entries.get_mut(key) {
            Some(entry) if !entry.is_expired(now) => {
                entry.touch(self.ttl, now);
                self.stats.record_hit();
                Some(entry.payload.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Delete ==
    /// Removes the entry under `key`.
    ///
    /// Returns whether an entry was physically present. Deleting a missing
    /// key is not an error.
    pub fn delete(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    // == Add To Slice ==
    /// Appends `value` to the sequence stored under `key`.
    ///
    /// With no live entry a fresh one-element sequence is started. A live
    /// sequence is extended and its deadline reset. Returns the sequence
    /// length after the append.
    ///
    /// # Errors
    /// `CacheError::NotASequence` if the live entry holds a `Single` payload;
    /// the entry is left untouched in that case.
    pub fn add_to_slice(&mut self, key: String, value: V) -> Result<usize> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get_mut(&key) {
            if !entry.is_expired(now) {
                let Payload::Sequence(values) = &mut entry.payload else {
                    return Err(CacheError::NotASequence(key));
                };
                values.push(value);
                let len = values.len();
                entry.touch(self.ttl, now);
                return Ok(len);
            }
        }

        let entry = CacheEntry::new(Payload::Sequence(vec![value]), self.ttl, now);
        self.entries.insert(key, entry);
        Ok(1)
    }

    // == Remove Expired ==
    /// Removes every entry expired at the current instant and records the
    /// pass in the stats.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired(now));

        let removed = before - self.entries.len();
        self.stats.record_sweep(removed);
        removed
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the number of entries in the map, including expired entries
    /// the sweeper has not reached yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V: Clone + Debug> CacheStore<V> {
    // == Dump ==
    /// Logs every key with its raw payload. Diagnostic only.
    ///
    /// Returns the number of entries logged.
    pub fn dump(&self) -> usize {
        let now = Instant::now();
        for (key, entry) in &self.entries {
            info!(
                key = %key,
                payload = ?entry.payload,
                expired = entry.is_expired(now),
                ttl_remaining = ?entry.ttl_remaining(now),
                "cache entry"
            );
        }
        self.entries.len()
    }
}
