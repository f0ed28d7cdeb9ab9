//! OS signal handling.
//!
//! # Responsibilities
//! - Register SIGTERM and SIGINT handlers before any component starts
//! - Turn the first of them into a "shutdown requested" event
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Registration is separate from waiting so install errors surface at startup
//! - No other signals are handled

use tokio::signal::unix::{signal, Signal, SignalKind};

/// Installed termination signal handlers.
pub struct TerminationSignals {
    interrupt: Signal,
    terminate: Signal,
}

impl TerminationSignals {
    /// Register handlers for SIGINT and SIGTERM.
    pub fn install() -> std::io::Result<Self> {
        Ok(Self {
            interrupt: signal(SignalKind::interrupt())?,
            terminate: signal(SignalKind::terminate())?,
        })
    }

    /// Wait for the first termination signal and return its name.
    pub async fn recv(mut self) -> &'static str {
        let name = tokio::select! {
            _ = self.interrupt.recv() => "SIGINT",
            _ = self.terminate.recv() => "SIGTERM",
        };
        tracing::info!(signal = name, "Shutdown signal received");
        name
    }
}
