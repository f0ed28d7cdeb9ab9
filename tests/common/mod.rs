//! Shared utilities for integration testing.

use std::io::Write;
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use path_readiness::config::{loader, SidecarConfig};
use path_readiness::{Shutdown, Sidecar};
use tokio::task::JoinHandle;

/// A sidecar running on an ephemeral port.
pub struct RunningSidecar {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<()>,
}

impl RunningSidecar {
    pub fn ready_url(&self) -> String {
        format!("http://{}/ready", self.addr)
    }

    /// Trigger shutdown and wait for the sidecar to finish.
    pub async fn stop(self) {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(3), self.handle)
            .await
            .expect("sidecar did not stop in time")
            .unwrap();
    }
}

/// Config probing `target` with fast intervals, bound to localhost.
pub fn fast_config(target: &Path, mode: &str, interval_secs: f64, timeout_secs: f64) -> SidecarConfig {
    let mut config = SidecarConfig::default();
    config.check.path = target.to_path_buf();
    config.check.mode = mode.to_string();
    config.check.interval_secs = interval_secs;
    config.check.timeout_secs = timeout_secs;
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.listener.shutdown_grace_secs = 1.0;
    config
}

/// Validate, bind and spawn the sidecar. It runs until `stop` is called.
pub async fn start_sidecar(config: SidecarConfig) -> RunningSidecar {
    let settings = loader::settings(&config).unwrap();
    let sidecar = Sidecar::bind(settings).await.unwrap();
    let addr = sidecar.local_addr().unwrap();
    let shutdown = sidecar.shutdown_handle();

    let handle = tokio::spawn(sidecar.run_until(std::future::pending()));

    RunningSidecar {
        addr,
        shutdown,
        handle,
    }
}

/// A temp file of `len` bytes.
#[allow(dead_code)]
pub fn data_file(len: usize) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&vec![0x5A; len]).unwrap();
    file.flush().unwrap();
    file
}

/// Plain client without connection pooling so shutdown is not held up.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

/// GET /ready and return the status code.
pub async fn ready_status(client: &reqwest::Client, sidecar: &RunningSidecar) -> u16 {
    client
        .get(sidecar.ready_url())
        .send()
        .await
        .expect("sidecar unreachable")
        .status()
        .as_u16()
}
