use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::document::{self, Document};
use crate::error::{CrptError, Result};
use crate::limiters::state::Lifecycle;
use crate::limiters::{AdmissionPool, GateState, Timekeeper};
use crate::settings::{GateSettings, TimeUnit};
use crate::transport::{HttpTransport, Transport};

/// Point-in-time view of a gate
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GateStats {
    pub state: GateState,
    pub request_limit: u32,
    pub window: Duration,
    pub available_permits: u32,
    pub admitted_in_window: u32,
    pub windows_elapsed: u64,
    pub window_started_ms: i64,
}

/// Submits documents through a transport, at most `request_limit` per window.
///
/// Callers over the limit wait in arrival order until the next window opens.
/// The gate is meant to be shared, e.g. behind an `Arc`, by many tasks.
#[derive(Debug)]
pub struct SubmissionGate<T: Transport = HttpTransport> {
    settings: GateSettings,
    pool: Arc<AdmissionPool>,
    timekeeper: Timekeeper,
    lifecycle: Lifecycle,
    transport: T,
}

impl SubmissionGate<HttpTransport> {
    /// Gate posting to the production endpoint. Must be called inside a tokio runtime.
    pub fn new(time_unit: TimeUnit, request_limit: u32) -> Result<Self> {
        Self::with_transport(
            GateSettings::new(time_unit, request_limit),
            HttpTransport::new()?,
        )
    }
}

impl<T: Transport> SubmissionGate<T> {
    pub fn with_transport(settings: GateSettings, transport: T) -> Result<Self> {
        settings.validate()?;
        let pool = Arc::new(AdmissionPool::new(settings.request_limit));
        let timekeeper = Timekeeper::start(pool.clone(), settings.window());
        info!(
            "Starting gate: {} requests per {}",
            settings.request_limit, settings.time_unit
        );

        Ok(Self {
            settings,
            pool,
            timekeeper,
            lifecycle: Lifecycle::new(),
            transport,
        })
    }

    /// Serialize `document`, wait for admission, then post it with `signature`.
    ///
    /// Dropping the returned future while it waits gives up the place in line
    /// without using up an admission.
    pub async fn submit(&self, document: &Document, signature: &str) -> Result<()> {
        let body = self.prepare(document)?;
        self.pool.admit().await?;
        self.post(body, signature).await
    }

    /// Like [`submit`](Self::submit), but gives up with `Interrupted` once
    /// `cancel` fires while still waiting for admission.
    pub async fn submit_until(
        &self,
        document: &Document,
        signature: &str,
        cancel: &CancellationToken,
    ) -> Result<()> {
        let body = self.prepare(document)?;
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("submission cancelled while waiting for admission");
                return Err(CrptError::Interrupted);
            }
            admitted = self.pool.admit() => admitted?,
        }
        self.post(body, signature).await
    }

    fn prepare(&self, document: &Document) -> Result<Vec<u8>> {
        if self.lifecycle.get() != GateState::Running {
            return Err(CrptError::Stopped);
        }
        document::to_json_bytes(document)
    }

    async fn post(&self, body: Vec<u8>, signature: &str) -> Result<()> {
        let result = self.transport.post(body, signature).await;
        if let Err(err) = &result {
            debug!("submission failed: {}", err);
        }
        result
    }

    /// Stop the timekeeper and refuse new admissions.
    ///
    /// Submissions already past the gate finish on their own. Waits up to the
    /// configured grace for the timekeeper, then aborts it. Safe to call more
    /// than once.
    pub async fn shutdown(&self) {
        if self.lifecycle.begin_stop() {
            info!("Shutting down gate after {} windows", self.pool.epoch());
            self.pool.close();
        }
        self.timekeeper.stop(self.settings.shutdown_grace).await;
        self.lifecycle.mark_stopped();
    }

    pub fn state(&self) -> GateState {
        self.lifecycle.get()
    }

    pub fn settings(&self) -> &GateSettings {
        &self.settings
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn stats(&self) -> GateStats {
        GateStats {
            state: self.state(),
            request_limit: self.pool.limit(),
            window: self.timekeeper.period(),
            available_permits: self.pool.available(),
            admitted_in_window: self.pool.admitted_in_window(),
            windows_elapsed: self.pool.epoch(),
            window_started_ms: self.pool.epoch_started_ms(),
        }
    }
}
