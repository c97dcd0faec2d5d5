//! TTL Sweeper Task
//!
//! Background task that periodically removes expired cache entries until it
//! is told to stop.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cache::{CacheStore, MAX_TTL};

/// Shortest period between two sweeps, whatever the TTL.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Returns the sweep period for a cache with the given TTL.
///
/// The period follows the TTL but never drops below `MIN_SWEEP_INTERVAL`,
/// so a zero TTL does not turn the sweeper into a busy loop, and never
/// exceeds `MAX_TTL`.
pub fn sweep_interval(ttl: Duration) -> Duration {
    ttl.clamp(MIN_SWEEP_INTERVAL, MAX_TTL)
}

// == Sweeper ==
/// Handle on a running sweep task.
///
/// Dropping the handle signals the task to stop without waiting for it;
/// `shutdown` signals and then joins it.
#[derive(Debug)]
pub struct Sweeper {
    /// Flipped to `true` to stop the task
    shutdown_tx: watch::Sender<bool>,
    /// Taken by the first `shutdown` call
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Sweeper {
    /// Spawns a task that sweeps `store` every `interval`.
    ///
    /// The first sweep happens one full interval after the spawn. Each sweep
    /// holds the store's write lock for the whole pass.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn spawn<V>(store: Arc<RwLock<CacheStore<V>>>, interval: Duration) -> Self
    where
        V: Clone + Send + Sync + 'static,
    {
        let interval = interval.min(MAX_TTL);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let first_sweep = Instant::now() + interval;
        let handle = tokio::spawn(run(store, first_sweep, interval, shutdown_rx));

        Self {
            shutdown_tx,
            handle: Mutex::new(Some(handle)),
        }
    }

    /// Asks the task to stop after its current pass, without waiting.
    pub fn signal_shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }

    /// Stops the task and waits for it to exit.
    ///
    /// Calling this more than once is harmless.
    pub async fn shutdown(&self) {
        self.signal_shutdown();

        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(handle) = handle {
            if let Err(err) = handle.await {
                warn!("TTL sweeper ended abnormally: {}", err);
            }
        }
    }

    /// Returns true once the task has exited (or has been joined).
    pub fn is_finished(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(true, JoinHandle::is_finished)
    }
}

impl Drop for Sweeper {
    fn drop(&mut self) {
        self.signal_shutdown();
    }
}

async fn run<V: Clone>(
    store: Arc<RwLock<CacheStore<V>>>,
    first_sweep: Instant,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) {
    info!(
        "Starting TTL sweeper with interval of {} ms",
        interval.as_millis()
    );

    // Scheduled from spawn time, not from when the task is first polled
    let mut ticker = tokio::time::interval_at(first_sweep, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = store.write().await.remove_expired();

                if removed > 0 {
                    info!("TTL sweep: removed {} expired entries", removed);
                } else {
                    debug!("TTL sweep: no expired entries found");
                }
            }
            changed = shutdown_rx.changed() => {
                // A dropped sender means the owning cache is gone
                if changed.is_err() || *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("TTL sweeper stopped");
}
