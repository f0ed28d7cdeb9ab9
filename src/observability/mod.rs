//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via `tracing`)
//!
//! Consumers:
//!     → stdout, pretty or JSON lines
//! ```
//!
//! The readiness endpoint itself is the only exported signal; there are no
//! metrics.

pub mod logging;
