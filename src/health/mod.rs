//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Probe loop (monitor.rs):
//!     Periodic timer
//!     → Run probe (probe.rs) on the blocking pool
//!     → On success, record in freshness.rs
//!
//! Readiness query (freshness.rs):
//!     now - last_success < threshold
//! ```
//!
//! # Design Decisions
//! - One target, one strategy, fixed at startup
//! - The tracker is the only state shared with the HTTP side
//! - Probe failures never escape the loop

pub mod freshness;
pub mod monitor;
pub mod probe;

pub use freshness::FreshnessTracker;
pub use monitor::ProbeMonitor;
pub use probe::{CheckMode, Probe, ProbeError};
