//! The bounded perceive/reason/act loop.

use tokio_util::sync::CancellationToken;

use crate::opera::action::Action;
use crate::opera::actor::Actor;
use crate::opera::agent::Agent;
use crate::opera::error::OperaError;
use crate::opera::percept::{self, Percept, Query};

pub struct Engine {
    actor: Actor,
    max_iter: usize,
}

impl Engine {
    /// `max_iter` defaults to 10 at the call site that builds the default
    /// `Engine`; construction here takes it explicitly so tests can exercise
    /// boundary values like 0.
    pub fn new(actor: Actor, max_iter: usize) -> Self {
        Self { actor, max_iter }
    }

    /// Drive the bounded loop for one query against `agent`.
    ///
    /// A `Tool` action with zero calls is rejected as `OperaError::Reasoner`
    /// before it would ever reach the Actor — the resolution to the open
    /// question of whether an empty fan-out is legal.
    pub async fn query(
        &self,
        query: Query,
        agent: &mut dyn Agent,
        cancel: &CancellationToken,
    ) -> Result<String, OperaError> {
        let mut percepts: Vec<Percept> = vec![percept::user(query)];

        for iteration in 0..self.max_iter {
            if log::log_enabled!(log::Level::Debug) {
                log::debug!("engine iteration {}/{}", iteration + 1, self.max_iter);
            }
            let next = agent.action(&percepts).await?;

            match next {
                Action::User { content } => return Ok(content),
                Action::Tool { ref calls, .. } if calls.is_empty() => {
                    return Err(OperaError::Reasoner("tool action with no calls".into()));
                }
                Action::Tool { .. } => {
                    percepts = self.actor.act(&next, cancel).await?;
                }
            }
        }

        log::error!("engine exhausted {} iteration(s) without a final answer", self.max_iter);
        Err(OperaError::MaxIterations(self.max_iter))
    }
}
