//! Startup orchestration and shutdown sequencing.
//!
//! # Responsibilities
//! - Bind the readiness listener before anything runs
//! - Start the probe monitor and readiness server as tracked tasks
//! - On a shutdown request, trigger the shared signal and wait for both tasks
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and happens before tasks spawn
//! - The "shutdown requested" event is any future; OS signals are one source
//! - A component exiting on its own also shuts the sidecar down

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::{JoinError, JoinSet};

use crate::config::Settings;
use crate::health::{FreshnessTracker, ProbeMonitor};
use crate::http::ReadinessServer;
use crate::lifecycle::Shutdown;

/// Fatal errors before the sidecar starts serving.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to install signal handlers: {0}")]
    Signals(#[source] std::io::Error),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// A bound, not yet running sidecar.
pub struct Sidecar {
    settings: Settings,
    listener: TcpListener,
    tracker: Arc<FreshnessTracker>,
    shutdown: Shutdown,
}

impl Sidecar {
    /// Bind the listener from `settings`.
    pub async fn bind(settings: Settings) -> Result<Self, StartupError> {
        let address = settings.bind_address;
        let listener = TcpListener::bind(address)
            .await
            .map_err(|source| StartupError::Bind { address, source })?;

        tracing::info!(
            address = %listener.local_addr().unwrap_or(address),
            "Listening for connections"
        );

        Ok(Self {
            tracker: Arc::new(FreshnessTracker::new(settings.staleness_threshold)),
            settings,
            listener,
            shutdown: Shutdown::new(),
        })
    }

    /// The address actually bound (useful with port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    pub fn tracker(&self) -> Arc<FreshnessTracker> {
        self.tracker.clone()
    }

    /// A handle that stops the sidecar when triggered.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Run both components until `shutdown_requested` resolves, then stop them.
    pub async fn run_until<F>(self, shutdown_requested: F)
    where
        F: Future<Output = ()>,
    {
        let Sidecar {
            settings,
            listener,
            tracker,
            shutdown,
        } = self;

        let mut tasks = JoinSet::new();

        let monitor = ProbeMonitor::new(settings.probe, settings.check_interval, tracker.clone());
        let monitor_shutdown = shutdown.clone();
        tasks.spawn(async move {
            monitor.run(monitor_shutdown).await;
            "probe monitor"
        });

        let server = ReadinessServer::new(tracker, settings.request_timeout, settings.shutdown_grace);
        let server_shutdown = shutdown.clone();
        tasks.spawn(async move {
            if let Err(e) = server.run(listener, server_shutdown).await {
                tracing::error!(error = %e, "Readiness server failed");
            }
            "readiness server"
        });

        tokio::pin!(shutdown_requested);
        tokio::select! {
            _ = &mut shutdown_requested => {}
            _ = shutdown.wait() => {}
            Some(exited) = tasks.join_next() => {
                tracing::error!("Component exited before shutdown was requested");
                log_exit(exited);
            }
        }

        shutdown.trigger();

        while let Some(exited) = tasks.join_next().await {
            log_exit(exited);
        }
    }
}

fn log_exit(exited: Result<&'static str, JoinError>) {
    match exited {
        Ok(component) => tracing::info!(component, "Component stopped"),
        Err(e) => tracing::error!(error = %e, "Component task failed"),
    }
}
