use std::{sync::Arc, time::Duration};

use tokio::{
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tokio_util::sync::CancellationToken;

use super::TrackCache;

const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// When the background task writes the cache to disk.
///
/// A zero `interval` is treated as one millisecond.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlushSchedule {
    pub first_delay: Duration,
    pub interval: Duration,
}

impl Default for FlushSchedule {
    fn default() -> Self {
        Self {
            first_delay: Duration::from_secs(3 * 60),
            interval: Duration::from_secs(5 * 60),
        }
    }
}

/// Periodic persistence of a [`TrackCache`].
///
/// The task runs independently from resolution; it only reads a snapshot of
/// the cache, so puts and lookups never wait on disk I/O. Failed writes are
/// logged and retried on the next tick.
///
/// Dropping a `CacheFlusher` without calling [`CacheFlusher::shutdown`]
/// cancels the task but skips the final write.
pub struct CacheFlusher {
    cache: Arc<TrackCache>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl CacheFlusher {
    /// Spawns the flush task on the current tokio runtime.
    pub fn start(cache: Arc<TrackCache>, schedule: FlushSchedule) -> Self {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(Arc::clone(&cache), schedule, cancel.clone()));

        tracing::debug!(
            path = %cache.path().display(),
            first_delay_secs = schedule.first_delay.as_secs(),
            interval_secs = schedule.interval.as_secs(),
            "Track cache flusher started."
        );

        Self {
            cache,
            cancel,
            handle: Some(handle),
        }
    }

    pub fn cache(&self) -> &Arc<TrackCache> {
        &self.cache
    }

    /// Stops the periodic task and writes whatever changed since the last flush.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(error = %e, "Track cache flusher task ended abnormally.");
            }
        }

        flush_logged(&self.cache).await;
        tracing::debug!("Track cache flusher stopped.");
    }
}

impl Drop for CacheFlusher {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn run(cache: Arc<TrackCache>, schedule: FlushSchedule, cancel: CancellationToken) {
    // interval_at panics on a zero period
    let period = schedule.interval.max(MIN_INTERVAL);
    let mut ticker = interval_at(Instant::now() + schedule.first_delay, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => flush_logged(&cache).await,
        }
    }
}

async fn flush_logged(cache: &TrackCache) {
    if let Err(e) = cache.flush_if_dirty().await {
        tracing::error!(
            path = %cache.path().display(),
            error = %e,
            "Something went wrong during cache serialization."
        );
    }
}
