//! crpt-gate settings
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config_error;
use crate::error::Result;

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DOCUMENTS_CREATE_URL: &str = "https://ismp.crpt.ru/api/v3/lk/documents/create";
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Unit of time whose length is the rate-limit window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Nanoseconds,
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    /// Length of exactly one unit.
    pub const fn one(self) -> Duration {
        match self {
            TimeUnit::Nanoseconds => Duration::from_nanos(1),
            TimeUnit::Microseconds => Duration::from_micros(1),
            TimeUnit::Milliseconds => Duration::from_millis(1),
            TimeUnit::Seconds => Duration::from_secs(1),
            TimeUnit::Minutes => Duration::from_secs(60),
            TimeUnit::Hours => Duration::from_secs(60 * 60),
            TimeUnit::Days => Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl std::fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeUnit::Nanoseconds => write!(f, "nanoseconds"),
            TimeUnit::Microseconds => write!(f, "microseconds"),
            TimeUnit::Milliseconds => write!(f, "milliseconds"),
            TimeUnit::Seconds => write!(f, "seconds"),
            TimeUnit::Minutes => write!(f, "minutes"),
            TimeUnit::Hours => write!(f, "hours"),
            TimeUnit::Days => write!(f, "days"),
        }
    }
}

impl std::str::FromStr for TimeUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ns" | "nanos" | "nanosecond" | "nanoseconds" => Ok(TimeUnit::Nanoseconds),
            "us" | "micros" | "microsecond" | "microseconds" => Ok(TimeUnit::Microseconds),
            "ms" | "millis" | "millisecond" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "sec" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "min" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            _ => Err(format!("Invalid time unit: {}", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GateSettings {
    // Window length is one of these
    pub time_unit: TimeUnit,

    // Max admissions per window
    pub request_limit: u32,

    // How long shutdown waits for the timekeeper before aborting it
    pub shutdown_grace: Duration,
}

impl GateSettings {
    pub fn new(time_unit: TimeUnit, request_limit: u32) -> Self {
        Self {
            time_unit,
            request_limit,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
        }
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    pub fn window(&self) -> Duration {
        self.time_unit.one()
    }

    pub fn validate(&self) -> Result<()> {
        if self.request_limit == 0 {
            return Err(config_error!(
                "request_limit must be at least 1, got {}",
                self.request_limit
            ));
        }
        // tokio's semaphore caps the permit count well below u32::MAX on 32-bit targets
        if self.request_limit as usize > tokio::sync::Semaphore::MAX_PERMITS {
            return Err(config_error!(
                "request_limit {} exceeds the supported maximum {}",
                self.request_limit,
                tokio::sync::Semaphore::MAX_PERMITS
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransportSettings {
    pub url: String,
    pub timeout: Option<Duration>,
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            url: DOCUMENTS_CREATE_URL.to_string(),
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
        }
    }
}

impl TransportSettings {
    pub fn user_agent() -> String {
        format!("{}/{}", APP_NAME, APP_VERSION)
    }
}
