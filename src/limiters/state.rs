use std::sync::atomic::{AtomicU8, Ordering};

use serde::{Deserialize, Serialize};

/// Lifecycle of a gate: `Running` -> `Stopping` -> `Stopped`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GateState {
    Running,
    Stopping,
    Stopped,
}

impl std::fmt::Display for GateState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateState::Running => write!(f, "running"),
            GateState::Stopping => write!(f, "stopping"),
            GateState::Stopped => write!(f, "stopped"),
        }
    }
}

const RUNNING: u8 = 0;
const STOPPING: u8 = 1;
const STOPPED: u8 = 2;

#[derive(Debug)]
pub(crate) struct Lifecycle(AtomicU8);

impl Lifecycle {
    pub fn new() -> Self {
        Self(AtomicU8::new(RUNNING))
    }

    pub fn get(&self) -> GateState {
        match self.0.load(Ordering::Acquire) {
            RUNNING => GateState::Running,
            STOPPING => GateState::Stopping,
            _ => GateState::Stopped,
        }
    }

    /// Move `Running` to `Stopping`. Only the first caller gets `true`.
    pub fn begin_stop(&self) -> bool {
        self.0
            .compare_exchange(RUNNING, STOPPING, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    pub fn mark_stopped(&self) {
        self.0.store(STOPPED, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transitions_once() {
        let lifecycle = Lifecycle::new();
        assert_eq!(lifecycle.get(), GateState::Running);
        assert!(lifecycle.begin_stop());
        assert!(!lifecycle.begin_stop());
        assert_eq!(lifecycle.get(), GateState::Stopping);
        lifecycle.mark_stopped();
        assert_eq!(lifecycle.get(), GateState::Stopped);
        assert!(!lifecycle.begin_stop());
        assert_eq!(GateState::Stopped.to_string(), "stopped");
    }
}
