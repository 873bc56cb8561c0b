//! HTTP boundary: router construction, background refresh spawning, and
//! graceful shutdown, grounded on
//! `examples/CloudLLM-ai-cloudllm/src/cloudllm/mcp_http_adapter.rs`'s
//! Axum-adapter shape.

mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::opera::discovery::{DockerDiscovery, Discovery};
use crate::opera::engine::Engine;
use crate::opera::error::OperaError;
use crate::opera::store::AgentStore;

/// Shared state handed to every handler.
pub struct AppState {
    pub store: AgentStore,
    pub discovery: Arc<dyn Discovery>,
    pub engine: Engine,
    pub cancel: CancellationToken,
}

pub struct Api {
    state: Arc<AppState>,
}

impl Api {
    pub fn new(discovery: Arc<dyn Discovery>, max_iter: usize, cancel: CancellationToken) -> Self {
        let actor = crate::opera::actor::Actor::new(discovery.clone());
        let engine = Engine::new(actor, max_iter);
        Self {
            state: Arc::new(AppState {
                store: AgentStore::new(),
                discovery,
                engine,
                cancel,
            }),
        }
    }

    /// Build the Axum router without binding a socket. Exposed so tests can
    /// drive requests through `tower::ServiceExt::oneshot` without a live
    /// listener.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/v1/agents", post(handlers::create_agent))
            .route(
                "/v1/agents/{agent_id}",
                post(handlers::query_agent).delete(handlers::delete_agent),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind `addr` and serve until `cancel` fires.
    pub async fn serve(&self, addr: &str) -> Result<(), OperaError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|e| OperaError::Internal(e.to_string()))?;
        let bound = listener
            .local_addr()
            .map_err(|e| OperaError::Internal(e.to_string()))?;
        log::info!("opera listening on {}", bound);

        let app = self
            .router()
            .into_make_service_with_connect_info::<SocketAddr>();
        let cancel = self.state.cancel.clone();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move { cancel.cancelled().await })
            .await
            .map_err(|e| OperaError::Internal(e.to_string()))
    }
}

/// Spawn the 30s periodic `Discovery::refresh` driver against a concrete
/// `DockerDiscovery`, honoring `cancel` between ticks.
pub fn spawn_discovery_refresh(
    discovery: Arc<DockerDiscovery>,
    cancel: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    crate::opera::discovery::docker::spawn_refresh_driver(discovery, cancel)
}
