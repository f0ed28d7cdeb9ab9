//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, timeout + trace layers)
//!     → GET /ready → freshness tracker → 200 / 500
//! ```

pub mod server;

pub use server::ReadinessServer;
