//! Readiness HTTP server.
//!
//! # Responsibilities
//! - Create the Axum Router with the `/ready` handler
//! - Wire up middleware (tracing, request timeout)
//! - Serve until shutdown, then drain within the grace period
//!
//! # Design Decisions
//! - Graceful close: stop accepting, let in-flight requests finish
//! - The drain is bounded by `shutdown_grace`; stragglers are dropped with the process
//! - Handlers only read the freshness tracker

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Router,
};
use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::health::FreshnessTracker;
use crate::lifecycle::Shutdown;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<FreshnessTracker>,
}

/// HTTP server exposing the readiness endpoint.
pub struct ReadinessServer {
    router: Router,
    shutdown_grace: Duration,
}

impl ReadinessServer {
    pub fn new(tracker: Arc<FreshnessTracker>, request_timeout: Duration, shutdown_grace: Duration) -> Self {
        let router = build_router(AppState { tracker }, request_timeout);
        Self::from_router(router, shutdown_grace)
    }

    fn from_router(router: Router, shutdown_grace: Duration) -> Self {
        Self {
            router,
            shutdown_grace,
        }
    }

    /// Serve on `listener` until `shutdown` is triggered.
    pub async fn run(self, listener: TcpListener, shutdown: Shutdown) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "Readiness server starting");

        let serve = axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown.wait_owned())
            .into_future();
        tokio::pin!(serve);

        let grace = self.shutdown_grace;
        let drain_deadline = async {
            shutdown.wait().await;
            tokio::time::sleep(grace).await;
        };

        tokio::select! {
            result = &mut serve => result?,
            _ = drain_deadline => {
                tracing::warn!(grace = ?grace, "In-flight requests did not drain in time, closing");
            }
        }

        tracing::info!("Readiness server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(TraceLayer::new_for_http())
}

async fn ready_handler(State(state): State<AppState>) -> impl IntoResponse {
    if state.tracker.is_ready() {
        (StatusCode::OK, "ok")
    } else {
        tracing::debug!(
            last_success_age = ?state.tracker.last_success_age(),
            "Readiness probe answered not ready"
        );
        (StatusCode::INTERNAL_SERVER_ERROR, "not ready")
    }
}
