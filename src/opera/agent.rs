//! Owns a single conversation's history and reasoner binding; turns
//! incoming percepts into the next `Action`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::opera::discovery::Discovery;
use crate::opera::error::OperaError;
use crate::opera::history::History;
use crate::opera::percept::Percept;
use crate::opera::reasoner::Reasoner;

/// An Agent is single-threaded with respect to `action`; concurrent calls
/// on the same Agent are undefined. The agent store enforces one-in-flight
/// per id (see `store.rs`).
#[async_trait]
pub trait Agent: Send + Sync {
    async fn action(&mut self, percepts: &[Percept]) -> Result<crate::opera::action::Action, OperaError>;

    fn history(&self) -> &History;
}

/// The reference `Agent`: appends percepts, asks discovery for the current
/// catalog, reasons, and appends the resulting action — grounded on
/// `examples/original_source/pkg/agent/function/agent.go`.
pub struct FunctionAgent {
    history: History,
    reasoner: Arc<dyn Reasoner>,
    discovery: Arc<dyn Discovery>,
}

impl FunctionAgent {
    pub fn new(
        system_prompt: impl Into<String>,
        reasoner: Arc<dyn Reasoner>,
        discovery: Arc<dyn Discovery>,
    ) -> Self {
        let mut history = History::new();
        history.add_system(system_prompt);
        Self {
            history,
            reasoner,
            discovery,
        }
    }
}

#[async_trait]
impl Agent for FunctionAgent {
    async fn action(&mut self, percepts: &[Percept]) -> Result<crate::opera::action::Action, OperaError> {
        self.history.add_percepts(percepts);

        let tools = self.discovery.all().await;
        let action = self.reasoner.reason(&self.history, &tools).await?;

        // No compensating rollback on failure: percepts above stay appended
        // even if `reason` had errored, matching the documented behavior.
        self.history.add_action(&action);
        Ok(action)
    }

    fn history(&self) -> &History {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opera::action;
    use crate::opera::history::Event;
    use crate::opera::percept::{self, Query};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct StubReasoner {
        next: Mutex<Vec<crate::opera::action::Action>>,
    }

    #[async_trait]
    impl Reasoner for StubReasoner {
        async fn reason(
            &self,
            _history: &History,
            _tools: &[crate::opera::tool::Tool],
        ) -> Result<crate::opera::action::Action, OperaError> {
            Ok(self.next.lock().unwrap().remove(0))
        }
    }

    #[tokio::test]
    async fn action_appends_percepts_then_assistant_event() {
        let reasoner = Arc::new(StubReasoner {
            next: Mutex::new(vec![action::user("Hello")]),
        });
        let discovery = Arc::new(crate::opera::discovery::MockDiscovery::new(vec![]));
        let mut agent = FunctionAgent::new("be helpful", reasoner, discovery);

        let percepts = vec![percept::user(Query { text: "hi".into(), image: None })];
        let result = agent.action(&percepts).await.unwrap();

        assert_eq!(result.user(), Some("Hello"));
        let events = agent.history().all();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], Event::System { .. }));
        assert!(matches!(events[1], Event::User { .. }));
        assert!(matches!(events[2], Event::Assistant { .. }));
    }
}
