//! Stopping rules shared by the engines.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The iteration budget was used up.
    MaxIterations,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// The incumbent reached the target cost.
    TargetReached,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Time, target and cancellation checks, evaluated once per outer iteration.
#[derive(Debug)]
pub(crate) struct Budget {
    start: Instant,
    time_limit: Option<Duration>,
    target_cost: Option<f64>,
    cancel: Option<Arc<AtomicBool>>,
}

impl Budget {
    pub(crate) fn new(
        time_limit_ms: Option<u64>,
        target_cost: Option<f64>,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            start: Instant::now(),
            time_limit: time_limit_ms.map(Duration::from_millis),
            target_cost,
            cancel,
        }
    }

    /// Checked before an iteration starts.
    pub(crate) fn interrupted(&self) -> Option<StopReason> {
        if let Some(ref flag) = self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        match self.time_limit {
            Some(limit) if self.start.elapsed() >= limit => Some(StopReason::TimeLimit),
            _ => None,
        }
    }

    /// Checked after the incumbent is updated.
    pub(crate) fn target_reached(&self, best_cost: f64) -> bool {
        self.target_cost.is_some_and(|t| best_cost <= t)
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
