//! Entrypoint, mirroring `examples/original_source/cmd/main.go`'s
//! load-config → build collaborators → serve → graceful-shutdown sequence.

use std::sync::Arc;

use bollard::Docker;
use opera::opera::api::{spawn_discovery_refresh, Api};
use opera::opera::config::Config;
use opera::opera::discovery::{Discovery, DockerDiscovery};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let level = if config.debug_logger { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let docker = match Docker::connect_with_local_defaults() {
        Ok(d) => d,
        Err(e) => {
            log::error!("failed to connect to container runtime: {}", e);
            std::process::exit(1);
        }
    };

    let cancel = CancellationToken::new();
    let discovery = Arc::new(DockerDiscovery::new(docker));
    if let Err(e) = discovery.refresh().await {
        log::error!("initial discovery refresh failed: {}", e);
    }

    let refresh_handle = spawn_discovery_refresh(discovery.clone(), cancel.clone());
    let api = Api::new(discovery, 10, cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::info!("shutdown signal received");
            cancel.cancel();
        }
    });

    if let Err(e) = api.serve(&config.addr).await {
        log::error!("server error: {}", e);
    }

    let _ = refresh_handle.await;
}
