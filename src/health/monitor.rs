//! Periodic probing of the target path.
//!
//! # Responsibilities
//! - Run the configured probe on a fixed interval
//! - Record successes in the freshness tracker
//! - Log failures and keep going
//!
//! # Design Decisions
//! - First probe fires immediately; missed ticks are skipped, not bursted
//! - Probes run on the blocking pool so a hung mount never stalls request handling
//! - Both the tick wait and the in-flight probe race the shutdown signal

use std::sync::Arc;
use std::time::Duration;
use tokio::task;
use tokio::time::{self, MissedTickBehavior};

use crate::health::freshness::FreshnessTracker;
use crate::health::probe::{Probe, ProbeError};
use crate::lifecycle::Shutdown;

pub struct ProbeMonitor {
    probe: Probe,
    interval: Duration,
    tracker: Arc<FreshnessTracker>,
}

impl ProbeMonitor {
    pub fn new(probe: Probe, interval: Duration, tracker: Arc<FreshnessTracker>) -> Self {
        Self {
            probe,
            interval,
            tracker,
        }
    }

    /// Probe until `shutdown` is triggered.
    pub async fn run(self, shutdown: Shutdown) {
        tracing::info!(
            target_path = %self.probe.target().display(),
            mode = %self.probe.mode(),
            interval = ?self.interval,
            "Probe monitor starting"
        );

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut was_ready = false;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                biased;
                _ = shutdown.wait() => break,
                outcome = self.probe_once() => outcome,
            };

            match outcome {
                Ok(()) => self.tracker.record_success(),
                Err(e) => {
                    tracing::warn!(
                        target_path = %self.probe.target().display(),
                        mode = %self.probe.mode(),
                        error = %e,
                        "Check failed"
                    );
                }
            }

            let ready = self.tracker.is_ready();
            if ready != was_ready {
                if ready {
                    tracing::info!("Target is ready");
                } else {
                    tracing::warn!(
                        last_success_age = ?self.tracker.last_success_age(),
                        threshold = ?self.tracker.threshold(),
                        "Target went stale"
                    );
                }
                was_ready = ready;
            }
        }

        tracing::info!("Probe monitor received shutdown signal, exiting loop");
    }

    async fn probe_once(&self) -> Result<(), ProbeError> {
        let probe = self.probe.clone();
        match task::spawn_blocking(move || probe.run()).await {
            Ok(outcome) => outcome,
            // Only reachable if the probe panicked.
            Err(e) => Err(ProbeError::Io {
                op: "probe",
                path: self.probe.target().to_path_buf(),
                source: std::io::Error::other(e),
            }),
        }
    }
}
