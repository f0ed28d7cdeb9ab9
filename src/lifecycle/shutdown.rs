//! Shutdown coordination for the sidecar.

use tokio_util::sync::CancellationToken;

/// One-shot, level-triggered shutdown signal.
///
/// Clones share the same signal. Once triggered it stays triggered, and
/// every waiter, including ones that start waiting afterwards, observes it.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Create a new, untriggered shutdown signal.
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Trigger the shutdown signal. Later calls are no-ops.
    pub fn trigger(&self) {
        if !self.token.is_cancelled() {
            tracing::debug!("Shutdown triggered");
        }
        self.token.cancel();
    }

    /// Whether the signal has been triggered.
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Wait until the signal is triggered.
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }

    /// Owned future resolving on trigger, for APIs that need `'static`.
    pub fn wait_owned(&self) -> impl std::future::Future<Output = ()> + Send + 'static {
        self.token.clone().cancelled_owned()
    }
}
