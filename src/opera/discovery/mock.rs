//! Fixed in-memory `Discovery` for agent/engine unit tests, mirroring
//! `examples/original_source/pkg/tool/mock`.

use async_trait::async_trait;

use crate::opera::discovery::Discovery;
use crate::opera::error::OperaError;
use crate::opera::registry::Registry;
use crate::opera::tool::Tool;

/// A `Discovery` whose catalog is fixed at construction time; `refresh` is
/// a no-op that always succeeds.
pub struct MockDiscovery {
    registry: Registry,
}

impl MockDiscovery {
    pub fn new(tools: Vec<Tool>) -> Self {
        let registry = Registry::new();
        for tool in tools {
            registry.add(tool).expect("mock catalog has duplicate tool names");
        }
        Self { registry }
    }
}

#[async_trait]
impl Discovery for MockDiscovery {
    async fn refresh(&self) -> Result<(), OperaError> {
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Tool, OperaError> {
        self.registry.get(name)
    }

    async fn all(&self) -> Vec<Tool> {
        self.registry.all()
    }
}
