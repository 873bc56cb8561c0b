//! Tool discovery: turns container labels into registered `Tool`s.

pub mod docker;
pub mod mock;

use async_trait::async_trait;

use crate::opera::error::OperaError;
use crate::opera::tool::Tool;

pub use docker::DockerDiscovery;
pub use mock::MockDiscovery;

/// Produces the live tool catalog by interrogating an ambient source of
/// tool candidates (a container runtime, or a fixed in-memory set in tests).
#[async_trait]
pub trait Discovery: Send + Sync {
    /// Enumerate candidates and register whichever validate. Returns a
    /// joined error if any candidate failed, but does not roll back
    /// candidates that succeeded.
    async fn refresh(&self) -> Result<(), OperaError>;

    async fn get(&self, name: &str) -> Result<Tool, OperaError>;

    async fn all(&self) -> Vec<Tool>;
}
