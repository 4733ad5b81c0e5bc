//! Fixed-window admission pool.
//!
//! Permits live in a FIFO-fair semaphore. Callers consume a permit per
//! admission and never hand it back; the timekeeper is the only source of new
//! permits and tops the pool back up to the limit once per window. A per-window
//! counter double-checks the ceiling in case an admission straddles a window
//! boundary.
use std::sync::atomic::{AtomicI64, AtomicU32, AtomicU64, Ordering};

use chrono::Utc;
use tokio::sync::{Semaphore, TryAcquireError};
use tracing::{debug, warn};

use crate::error::{CrptError, Result};

#[derive(Debug)]
pub struct AdmissionPool {
    limit: u32,
    permits: Semaphore,

    /// Admissions counted in the current window
    admitted: AtomicU32,

    /// Window number, bumped on every replenish
    epoch: AtomicU64,

    /// Start of the current window in unix milliseconds
    epoch_started_ms: AtomicI64,
}

impl AdmissionPool {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            permits: Semaphore::new(limit as usize),
            admitted: AtomicU32::new(0),
            epoch: AtomicU64::new(0),
            epoch_started_ms: AtomicI64::new(Utc::now().timestamp_millis()),
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Wait in line for a permit.
    ///
    /// Dropping the future before it resolves leaves the pool untouched.
    pub async fn admit(&self) -> Result<()> {
        let permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| CrptError::Stopped)?;
        permit.forget();
        self.count_admission()
    }

    /// Take a permit only if one is free right now.
    /// Returns `Ok(false)` when the window is used up.
    pub fn try_admit(&self) -> Result<bool> {
        match self.permits.try_acquire() {
            Ok(permit) => {
                permit.forget();
                self.count_admission()?;
                Ok(true)
            }
            Err(TryAcquireError::NoPermits) => Ok(false),
            Err(TryAcquireError::Closed) => Err(CrptError::Stopped),
        }
    }

    fn count_admission(&self) -> Result<()> {
        let admitted = self.admitted.fetch_add(1, Ordering::AcqRel) + 1;
        if admitted > self.limit {
            warn!(
                "[epoch {}] admission {} exceeds limit {}",
                self.epoch(),
                admitted,
                self.limit
            );
            return Err(CrptError::LimitExceeded { limit: self.limit });
        }
        debug!(
            "[epoch {}] admitted {}/{}",
            self.epoch(),
            admitted,
            self.limit
        );
        Ok(())
    }

    /// Open a new window: reset the counter and restore the pool to `limit`.
    /// Returns the number of permits added.
    ///
    /// Must only be driven by one timekeeper at a time.
    pub fn replenish(&self) -> u32 {
        if self.permits.is_closed() {
            return 0;
        }
        // Counter first: a straggler admitted on an old permit lands in the new
        // window and the guard sees it.
        self.admitted.store(0, Ordering::Release);
        self.epoch_started_ms
            .store(Utc::now().timestamp_millis(), Ordering::Release);
        self.epoch.fetch_add(1, Ordering::AcqRel);

        // Only admissions run concurrently and they only lower the count,
        // so topping up by the observed shortfall never overshoots.
        let available = self.available();
        let missing = self.limit.saturating_sub(available);
        if missing > 0 {
            self.permits.add_permits(missing as usize);
        }
        missing
    }

    /// Refuse further admissions and wake every waiter with `Stopped`.
    pub fn close(&self) {
        self.permits.close();
    }

    pub fn is_closed(&self) -> bool {
        self.permits.is_closed()
    }

    pub fn available(&self) -> u32 {
        // never above limit, which is a u32
        self.permits.available_permits().min(u32::MAX as usize) as u32
    }

    pub fn admitted_in_window(&self) -> u32 {
        self.admitted.load(Ordering::Acquire)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub fn epoch_started_ms(&self) -> i64 {
        self.epoch_started_ms.load(Ordering::Acquire)
    }
}
