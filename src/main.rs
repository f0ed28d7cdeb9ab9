//! Filesystem Readiness Sidecar
//!
//! Periodically probes a path and serves the result on `GET /ready`.
//!
//! # Architecture Overview
//!
//! ```text
//!     SIGINT / SIGTERM
//!            │
//!            ▼
//!    ┌───────────────┐   trigger   ┌──────────────────────────────────────────┐
//!    │   lifecycle   │────────────▶│             shutdown token                │
//!    │  coordinator  │             └───────┬──────────────────────┬───────────┘
//!    └───────────────┘                     │                      │
//!                                          ▼                      ▼
//!                                 ┌─────────────────┐    ┌─────────────────┐
//!          target path ◀── probe ─│  probe monitor  │    │ readiness server│◀── GET /ready
//!                                 └────────┬────────┘    └────────┬────────┘
//!                                          │ record_success       │ is_ready
//!                                          ▼                      ▼
//!                                 ┌────────────────────────────────────────┐
//!                                 │           freshness tracker            │
//!                                 └────────────────────────────────────────┘
//! ```

use clap::Parser;

use path_readiness::config::{loader, Cli, Settings};
use path_readiness::lifecycle::{Sidecar, StartupError, TerminationSignals};
use path_readiness::observability::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = loader::resolve(cli)?;
    let validated = loader::settings(&config);

    logging::init(&config.observability)?;

    tracing::info!("path-readiness v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = validated.inspect_err(|e| {
        tracing::error!(error = %e, "Invalid configuration");
    })?;

    tracing::info!(
        target_path = %settings.probe.target().display(),
        mode = %settings.probe.mode(),
        interval = ?settings.check_interval,
        timeout = ?settings.staleness_threshold,
        bind_address = %settings.bind_address,
        "Configuration loaded"
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let grace = settings.shutdown_grace;
    let result = runtime.block_on(run(settings));

    // A check stuck in the kernel (dead mount, FIFO) never returns; dropping the
    // runtime would wait on its blocking thread forever.
    runtime.shutdown_timeout(grace);

    result?;
    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run(settings: Settings) -> Result<(), StartupError> {
    // Handlers go in before anything runs so an early signal is never lost.
    let signals = TerminationSignals::install()
        .map_err(StartupError::Signals)
        .inspect_err(|e| tracing::error!(error = %e, "Startup failed"))?;

    let sidecar = Sidecar::bind(settings)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Startup failed"))?;

    sidecar
        .run_until(async move {
            signals.recv().await;
        })
        .await;

    Ok(())
}
