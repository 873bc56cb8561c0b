//! Container-runtime-backed `Discovery`, grounded on
//! `examples/original_source/pkg/tool/discovery/docker/discovery.go`.
//!
//! Enumerates running containers via `bollard`, resolves tool candidates
//! concurrently (one Tokio task per container), and folds the results into
//! a fresh registry snapshot in container-listing order before publishing
//! it atomically — the deterministic realization of the "first-added wins"
//! tie-break the contract calls for.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bollard::query_parameters::ListContainersOptionsBuilder;
use bollard::Docker;
use serde::Deserialize;

use crate::opera::discovery::Discovery;
use crate::opera::error::OperaError;
use crate::opera::registry::Registry;
use crate::opera::tool::{Parameters, Tool, ToolBuilder};
use crate::opera::transport::Transport;

const LABEL_NAME: &str = "com.github.Br0ce.opera.tool.name";
const LABEL_HOST: &str = "com.docker.compose.service";
const LABEL_PORT: &str = "com.github.Br0ce.opera.tool.port";
const LABEL_PATH: &str = "com.github.Br0ce.opera.tool.path";

/// JSON body returned by a tool's `GET /config` endpoint.
#[derive(Debug, Deserialize)]
struct ConfigDto {
    name: String,
    description: String,
    properties: HashMap<String, serde_json::Value>,
    #[serde(default)]
    required: Vec<String>,
}

pub struct DockerDiscovery {
    docker: Docker,
    transport: Transport,
    registry: Registry,
}

impl DockerDiscovery {
    pub fn new(docker: Docker) -> Self {
        Self {
            docker,
            transport: Transport::new(Duration::from_secs(5)),
            registry: Registry::new(),
        }
    }

    /// Labels required on a container for it to be treated as a tool
    /// candidate; `None` if any are missing (absorbed as `ErrNotATool`).
    fn candidate_addr(labels: &HashMap<String, String>) -> Option<(String, String)> {
        let name = labels.get(LABEL_NAME)?;
        let host = labels.get(LABEL_HOST)?;
        let port = labels.get(LABEL_PORT)?;
        let path = labels.get(LABEL_PATH)?;
        Some((name.clone(), format!("http://{}:{}{}", host, port, path)))
    }

    async fn resolve(transport: &Transport, name: String, addr: String) -> Result<Tool, OperaError> {
        let cancel = tokio_util::sync::CancellationToken::new();
        let body = transport.get(&format!("{}/config", addr), &cancel).await?;
        let dto: ConfigDto = serde_json::from_str(&body)
            .map_err(|e| OperaError::Transport(format!("bad /config body: {}", e)))?;
        if dto.name != name {
            log::debug!(
                "container label name {:?} does not match /config name {:?}; using label",
                name,
                dto.name
            );
        }
        let url = url::Url::parse(&addr).map_err(|e| OperaError::InvalidTool(e.to_string()))?;
        ToolBuilder::new()
            .with_name(name)
            .with_description(dto.description)
            .with_addr(url)
            .with_parameters(Parameters {
                properties: dto.properties,
                required: dto.required,
            })
            .build()
    }
}

#[async_trait]
impl Discovery for DockerDiscovery {
    async fn refresh(&self) -> Result<(), OperaError> {
        let options = ListContainersOptionsBuilder::new().all(false).build();
        let containers = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(|e| OperaError::Transport(e.to_string()))?;

        let mut handles = Vec::with_capacity(containers.len());
        for container in containers {
            let labels = container.labels.unwrap_or_default();
            let Some((name, addr)) = Self::candidate_addr(&labels) else {
                continue;
            };
            let transport = Transport::new(self.transport.timeout());
            handles.push(tokio::spawn(
                async move { Self::resolve(&transport, name, addr).await },
            ));
        }

        let mut snapshot = HashMap::new();
        let mut errors = Vec::new();
        for handle in handles {
            match handle.await {
                Ok(Ok(tool)) => {
                    if snapshot.contains_key(tool.name()) {
                        errors.push(OperaError::AlreadyExists(tool.name().to_string()));
                        continue;
                    }
                    snapshot.insert(tool.name().to_string(), tool);
                }
                Ok(Err(e)) => errors.push(e),
                Err(join_err) => errors.push(OperaError::Internal(join_err.to_string())),
            }
        }

        self.registry.replace(snapshot);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(OperaError::join(errors))
        }
    }

    async fn get(&self, name: &str) -> Result<Tool, OperaError> {
        self.registry.get(name)
    }

    async fn all(&self) -> Vec<Tool> {
        self.registry.all()
    }
}

/// Spawn the 30-second periodic refresh driver. Honors `cancel` between
/// ticks so shutdown is clean; a failing `refresh` is logged but does not
/// stop the driver.
pub fn spawn_refresh_driver(
    discovery: Arc<DockerDiscovery>,
    cancel: tokio_util::sync::CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30));
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    log::debug!("discovery refresh driver shutting down");
                    return;
                }
                _ = interval.tick() => {
                    if let Err(e) = discovery.refresh().await {
                        log::error!("discovery refresh failed: {}", e);
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_addr_requires_all_four_labels() {
        let mut labels = HashMap::new();
        labels.insert(LABEL_NAME.to_string(), "get_weather".to_string());
        labels.insert(LABEL_HOST.to_string(), "weather".to_string());
        labels.insert(LABEL_PORT.to_string(), "8080".to_string());
        assert!(DockerDiscovery::candidate_addr(&labels).is_none());

        labels.insert(LABEL_PATH.to_string(), "/".to_string());
        let (name, addr) = DockerDiscovery::candidate_addr(&labels).unwrap();
        assert_eq!(name, "get_weather");
        assert_eq!(addr, "http://weather:8080/");
    }
}
