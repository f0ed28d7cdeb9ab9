//! End-to-end readiness behaviour over HTTP.

use std::time::Duration;

use path_readiness::config::{loader, ConfigError, SidecarConfig, ValidationError};

mod common;

#[tokio::test]
async fn test_metadata_probe_becomes_ready() {
    let dir = tempfile::tempdir().unwrap();
    let sidecar = common::start_sidecar(common::fast_config(dir.path(), "metadata", 0.05, 5.0)).await;
    let client = common::client();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(common::ready_status(&client, &sidecar).await, 200);

    let body = client.get(sidecar.ready_url()).send().await.unwrap().text().await.unwrap();
    assert_eq!(body, "ok");

    sidecar.stop().await;
}

#[tokio::test]
async fn test_read_probe_on_block_file_becomes_ready() {
    let file = common::data_file(4096);
    let sidecar = common::start_sidecar(common::fast_config(file.path(), "read", 0.05, 5.0)).await;
    let client = common::client();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(common::ready_status(&client, &sidecar).await, 200);

    sidecar.stop().await;
}

#[tokio::test]
async fn test_read_probe_on_empty_file_never_ready() {
    let file = common::data_file(0);
    let sidecar = common::start_sidecar(common::fast_config(file.path(), "read", 0.05, 5.0)).await;
    let client = common::client();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(common::ready_status(&client, &sidecar).await, 500);

    sidecar.stop().await;
}

#[tokio::test]
async fn test_missing_target_is_not_ready() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("unmounted");
    let sidecar = common::start_sidecar(common::fast_config(&missing, "stat", 0.05, 5.0)).await;
    let client = common::client();

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(common::ready_status(&client, &sidecar).await, 500);

    sidecar.stop().await;
}

#[tokio::test]
async fn test_goes_stale_when_target_disappears() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("volume");
    std::fs::create_dir(&target).unwrap();

    let sidecar = common::start_sidecar(common::fast_config(&target, "metadata", 0.05, 0.3)).await;
    let client = common::client();

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert_eq!(common::ready_status(&client, &sidecar).await, 200);

    std::fs::remove_dir(&target).unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(common::ready_status(&client, &sidecar).await, 500);

    std::fs::create_dir(&target).unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(common::ready_status(&client, &sidecar).await, 200, "recovers on next success");

    sidecar.stop().await;
}

#[tokio::test]
async fn test_concurrent_requests() {
    let dir = tempfile::tempdir().unwrap();
    let sidecar = common::start_sidecar(common::fast_config(dir.path(), "metadata", 0.05, 5.0)).await;
    let client = common::client();

    tokio::time::sleep(Duration::from_millis(200)).await;

    let requests: Vec<_> = (0..32)
        .map(|_| {
            let client = client.clone();
            let url = sidecar.ready_url();
            tokio::spawn(async move { client.get(url).send().await.unwrap().status().as_u16() })
        })
        .collect();

    for request in requests {
        assert_eq!(request.await.unwrap(), 200);
    }

    sidecar.stop().await;
}

#[tokio::test]
async fn test_shutdown_stops_accepting() {
    let dir = tempfile::tempdir().unwrap();
    let sidecar = common::start_sidecar(common::fast_config(dir.path(), "metadata", 3600.0, 5.0)).await;
    let addr = sidecar.addr;

    sidecar.stop().await;

    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}

#[test]
fn test_empty_target_path_is_config_error() {
    let config = SidecarConfig::default();

    match loader::settings(&config) {
        Err(ConfigError::Validation(errors)) => {
            assert!(errors.contains(&ValidationError::EmptyCheckPath));
        }
        other => panic!("expected validation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unknown_mode_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = common::fast_config(dir.path(), "inotify", 1.0, 1.0);

    let err = loader::settings(&config).unwrap_err();
    assert!(err.to_string().contains("unsupported check mode `inotify`"));
}
