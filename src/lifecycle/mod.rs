//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Install signals → Bind listener → Spawn probe monitor + readiness server
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Trigger shared token → Both tasks exit → Process exits 0
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then signals, then listener, then tasks
//! - Shutdown is one-shot and level-triggered
//! - Server drain has a deadline; the probe loop stops at its next suspension point

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::TerminationSignals;
pub use startup::{Sidecar, StartupError};
