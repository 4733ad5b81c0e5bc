//! Background ticker marking window boundaries.
//!
//! The first tick fires one full window after start; every tick replenishes
//! the admission pool. Missed ticks are skipped, not replayed.
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info_span, warn};
use tracing_futures::Instrument;

use super::admission::AdmissionPool;

#[derive(Debug)]
pub struct Timekeeper {
    period: Duration,
    cancel: CancellationToken,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Timekeeper {
    /// Spawn the ticker on the current tokio runtime.
    pub fn start(pool: Arc<AdmissionPool>, period: Duration) -> Self {
        let cancel = CancellationToken::new();
        let task = Self::run(pool, period, cancel.clone())
            .instrument(info_span!("timekeeper", period_ms = period.as_millis() as u64));
        let handle = tokio::spawn(task);

        Self {
            period,
            cancel,
            handle: Mutex::new(Some(handle)),
        }
    }

    async fn run(pool: Arc<AdmissionPool>, period: Duration, cancel: CancellationToken) {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let added = pool.replenish();
                    debug!("[epoch {}] window opened, {} permits added", pool.epoch(), added);
                }
            }
        }
        debug!("timekeeper stopped after {} windows", pool.epoch());
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Signal the ticker and wait up to `grace` for it to exit, aborting it
    /// otherwise. Concurrent callers return once the task is gone.
    pub async fn stop(&self, grace: Duration) {
        self.cancel.cancel();

        let mut guard = self.handle.lock().await;
        let Some(mut handle) = guard.take() else {
            return;
        };
        if tokio::time::timeout(grace, &mut handle).await.is_err() {
            warn!("timekeeper did not stop within {:?}, aborting", grace);
            handle.abort();
            let _ = handle.await;
        }
    }
}

impl Drop for Timekeeper {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Ok(mut guard) = self.handle.try_lock() {
            if let Some(handle) = guard.take() {
                handle.abort();
            }
        }
    }
}
