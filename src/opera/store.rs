//! In-memory agent-ID → Agent mapping and the per-agent serialization point.
//!
//! Backed by `DashMap<String, Arc<tokio::sync::Mutex<Agent>>>`: callers that
//! need to run a query hold the agent's own mutex for the full duration of
//! `Engine::query`, giving true single-flight-per-agent serialization
//! instead of the reference implementation's accepted last-writer-wins race
//! on `Update` (see DESIGN.md for this Open-Question decision).

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::opera::agent::Agent;
use crate::opera::error::OperaError;
use crate::opera::ids;

pub struct AgentStore {
    agents: DashMap<String, Arc<Mutex<Box<dyn Agent>>>>,
}

impl AgentStore {
    pub fn new() -> Self {
        Self { agents: DashMap::new() }
    }

    /// Generate a fresh id and insert `agent` under it.
    pub fn add(&self, agent: Box<dyn Agent>) -> String {
        loop {
            let id = ids::unique_agent();
            if self.agents.contains_key(&id) {
                continue; // astronomically unlikely; retry rather than fail.
            }
            self.agents.insert(id.clone(), Arc::new(Mutex::new(agent)));
            return id;
        }
    }

    /// Fetch the shared handle to an agent's mutex, for a caller that will
    /// lock it for the duration of a query.
    pub fn get(&self, id: &str) -> Result<Arc<Mutex<Box<dyn Agent>>>, OperaError> {
        self.agents
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| OperaError::NotFound(id.to_string()))
    }

    pub fn delete(&self, id: &str) -> Result<(), OperaError> {
        self.agents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| OperaError::NotFound(id.to_string()))
    }
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}
