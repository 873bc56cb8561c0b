//! Concurrent dispatcher: fans a `Tool` action's calls out to their tool
//! services and collects one `Percept` per call.
//!
//! Grounded on `examples/original_source/pkg/action/actor.go`'s
//! one-goroutine-per-call + `errors.Join` pattern, realized here with a
//! `tokio::task::JoinSet` instead of a channel pair.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::opera::action::{Action, Call};
use crate::opera::discovery::Discovery;
use crate::opera::error::OperaError;
use crate::opera::percept::{self, Percept};
use crate::opera::transport::Transport;

pub struct Actor {
    discovery: Arc<dyn Discovery>,
    transport: Transport,
}

impl Actor {
    pub fn new(discovery: Arc<dyn Discovery>) -> Self {
        Self {
            discovery,
            transport: Transport::new(Duration::from_secs(30)),
        }
    }

    /// Dispatch `action`'s calls concurrently. `action` must be the `Tool`
    /// variant; the engine is responsible for rejecting zero-call actions
    /// before ever calling `act`.
    pub async fn act(
        &self,
        action: &Action,
        cancel: &CancellationToken,
    ) -> Result<Vec<Percept>, OperaError> {
        let (calls, _reason) = action
            .tool()
            .ok_or_else(|| OperaError::Internal("act called with a non-Tool action".into()))?;

        if log::log_enabled!(log::Level::Debug) {
            log::debug!("actor dispatching {} tool call(s)", calls.len());
        }

        let mut set: JoinSet<Result<Percept, OperaError>> = JoinSet::new();
        for call in calls.to_vec() {
            let discovery = self.discovery.clone();
            let transport = self.transport.clone();
            let cancel = cancel.clone();
            set.spawn(async move { Self::dispatch_one(discovery, transport, call, &cancel).await });
        }

        let mut percepts = Vec::new();
        let mut errors = Vec::new();
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(Ok(percept)) => percepts.push(percept),
                Ok(Err(e)) => errors.push(e),
                Err(join_err) => errors.push(OperaError::Internal(join_err.to_string())),
            }
        }

        if !errors.is_empty() {
            if log::log_enabled!(log::Level::Error) {
                log::error!("actor dispatch failed with {} error(s)", errors.len());
            }
            return Err(OperaError::join(errors));
        }
        Ok(percepts)
    }

    async fn dispatch_one(
        discovery: Arc<dyn Discovery>,
        transport: Transport,
        call: Call,
        cancel: &CancellationToken,
    ) -> Result<Percept, OperaError> {
        let tool = discovery.get(&call.name).await?;
        let body = transport
            .post(tool.addr().as_str(), call.arguments.clone(), cancel)
            .await?;
        Ok(percept::tool(call.id, body))
    }
}
