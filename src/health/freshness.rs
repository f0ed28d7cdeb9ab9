//! Freshness tracking for probe results.
//!
//! # Responsibilities
//! - Hold the instant of the last successful probe
//! - Answer readiness queries against the staleness threshold
//!
//! # Design Decisions
//! - Monotonic clock (`tokio::time::Instant`), so wall-clock jumps never flap readiness
//! - Mutex held only for the timestamp copy, never across I/O
//! - `None` is the "never succeeded" state; it is never ready

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Thread-safe holder of the last successful probe time.
#[derive(Debug)]
pub struct FreshnessTracker {
    last_success: Mutex<Option<Instant>>,
    threshold: Duration,
}

impl FreshnessTracker {
    /// Create a tracker that has never seen a success.
    pub fn new(threshold: Duration) -> Self {
        Self {
            last_success: Mutex::new(None),
            threshold,
        }
    }

    /// Record a successful probe at the current instant.
    pub fn record_success(&self) {
        *self.lock() = Some(Instant::now());
    }

    /// True iff a success was recorded less than `threshold` ago.
    pub fn is_ready(&self) -> bool {
        match self.last_success_age() {
            Some(age) => age < self.threshold,
            None => false,
        }
    }

    /// Age of the last recorded success, `None` before the first one.
    pub fn last_success_age(&self) -> Option<Duration> {
        let last = *self.lock();
        last.map(|at| Instant::now().saturating_duration_since(at))
    }

    /// The configured staleness threshold.
    pub fn threshold(&self) -> Duration {
        self.threshold
    }

    // A panic while holding the guard cannot leave a half-written `Option<Instant>`.
    fn lock(&self) -> MutexGuard<'_, Option<Instant>> {
        self.last_success.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
