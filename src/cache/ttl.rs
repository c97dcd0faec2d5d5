//! TTL Cache Module
//!
//! Shared, lock-guarded handle over a `CacheStore` together with the sweeper
//! that reclaims its expired entries.

use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tracing::info;

use crate::cache::{clamp_ttl, CacheStats, CacheStore, Payload};
use crate::error::Result;
use crate::tasks::{sweep_interval, Sweeper};

// == TTL Cache ==
/// Thread-safe TTL cache.
///
/// Every operation holds the store's single lock for its full duration.
/// `get`, `set`, `delete`, `add_to_slice` and `dump` take it exclusively
/// (a read touches the entry), `count` and `stats` share it.
///
/// # Example
/// ```rust,no_run
/// use std::time::Duration;
/// use ttl_cache::cache::{Payload, TtlCache};
///
/// #[tokio::main]
/// async fn main() {
///     let cache = TtlCache::new(Duration::from_secs(60));
///
///     cache.set("user:1", "alice".to_string()).await;
///     assert_eq!(
///         cache.get("user:1").await,
///         Some(Payload::Single("alice".to_string()))
///     );
///
///     cache.close().await;
/// }
/// ```
#[derive(Debug)]
pub struct TtlCache<V> {
    /// Entry map behind the cache-wide lock
    store: Arc<RwLock<CacheStore<V>>>,
    /// Background task removing expired entries
    sweeper: Sweeper,
    /// Lifetime applied to every entry
    ttl: Duration,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    // == Constructor ==
    /// Creates an empty cache and starts its sweeper.
    ///
    /// A zero TTL is accepted; entries then expire as soon as they are
    /// written and the sweeper runs at its minimum interval. TTLs above
    /// `MAX_TTL` (about 30 years) are clamped to it.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime, which the sweeper needs.
    pub fn new(ttl: Duration) -> Self {
        if tokio::runtime::Handle::try_current().is_err() {
            panic!(
                "TtlCache::new requires a Tokio runtime to spawn its sweeper; \
                 call it from within #[tokio::main], #[tokio::test] or a runtime context"
            );
        }

        let ttl = clamp_ttl(ttl);
        let store = Arc::new(RwLock::new(CacheStore::new(ttl)));
        let sweeper = Sweeper::spawn(Arc::clone(&store), sweep_interval(ttl));
        info!("TTL cache created with ttl of {} ms", ttl.as_millis());

        Self {
            store,
            sweeper,
            ttl,
        }
    }

    /// Returns the lifetime applied to entries, after clamping.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Set ==
    /// Stores `value` under `key`, replacing whatever was there.
    pub async fn set(&self, key: impl Into<String>, value: V) {
        self.store.write().await.set(key.into(), value);
    }

    // == Get ==
    /// Returns a copy of the payload under `key`, or `None` if it is absent
    /// or expired. A hit resets the entry's deadline to now + ttl.
    pub async fn get(&self, key: &str) -> Option<Payload<V>> {
        self.store.write().await.get(key)
    }

    // == Delete ==
    /// Removes `key`. Returns whether an entry was physically present.
    pub async fn delete(&self, key: &str) -> bool {
        self.store.write().await.delete(key)
    }

    // == Add To Slice ==
    /// Appends `value` to the sequence under `key`, starting a new one if
    /// there is no live entry. Returns the sequence length after the append.
    ///
    /// # Errors
    /// `CacheError::NotASequence` if the live entry was written by `set`.
    pub async fn add_to_slice(&self, key: impl Into<String>, value: V) -> Result<usize> {
        self.store.write().await.add_to_slice(key.into(), value)
    }

    // == Count ==
    /// Returns the number of entries in the map, including expired entries
    /// not yet swept. Advisory only.
    pub async fn count(&self) -> usize {
        self.store.read().await.len()
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub async fn stats(&self) -> CacheStats {
        self.store.read().await.stats()
    }

    // == Close ==
    /// Stops the sweeper and waits for it to exit.
    ///
    /// The cache stays usable afterwards, but expired entries are no longer
    /// reclaimed in the background. Dropping the cache also stops the sweeper.
    pub async fn close(&self) {
        self.sweeper.shutdown().await;
        info!("TTL cache closed");
    }

    /// Returns true once the sweeper has stopped.
    pub fn is_closed(&self) -> bool {
        self.sweeper.is_finished()
    }
}

impl<V> TtlCache<V>
where
    V: Clone + Debug + Send + Sync + 'static,
{
    // == Dump ==
    /// Logs every key and its raw payload at info level.
    ///
    /// Meant for debugging; it holds the exclusive lock while logging.
    /// Returns the number of entries logged.
    pub async fn dump(&self) -> usize {
        self.store.write().await.dump()
    }
}
