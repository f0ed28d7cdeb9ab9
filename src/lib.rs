//! Filesystem-backed readiness sidecar library.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::{Settings, SidecarConfig};
pub use health::{CheckMode, FreshnessTracker, Probe};
pub use http::ReadinessServer;
pub use lifecycle::{Shutdown, Sidecar};
