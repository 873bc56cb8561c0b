//! Append-only conversation history: the sealed `Event` union the reasoner
//! consumes and the engine extends.

use chrono::{DateTime, Utc};

use crate::opera::action::{Action, Call};
use crate::opera::percept::{Percept, Query, Response};

/// One entry in a `History`. Exhaustively matched wherever history is
/// consumed (the reasoner's message-building code, tests).
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    System { content: String, created: DateTime<Utc> },
    User { query: Query, created: DateTime<Utc> },
    Assistant { content: String, created: DateTime<Utc> },
    ToolCalls { calls: Vec<Call>, created: DateTime<Utc> },
    ToolResponse { response: Response, created: DateTime<Utc> },
}

/// Append-only ordered log of conversation events, owned exclusively by one
/// [`crate::opera::agent::Agent`]. Never shared between concurrent queries.
#[derive(Debug, Clone, Default)]
pub struct History {
    events: Vec<Event>,
}

impl History {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Append a `System` event. Conventionally the first event in a fresh
    /// history, establishing the agent's system prompt.
    pub fn add_system(&mut self, content: impl Into<String>) {
        self.events.push(Event::System {
            content: content.into(),
            created: Utc::now(),
        });
    }

    /// Append one event per percept: `User` percepts become `User` events,
    /// `Tool` percepts become `ToolResponse` events.
    pub fn add_percepts(&mut self, percepts: &[Percept]) {
        for p in percepts {
            let event = match p {
                Percept::User(query) => Event::User {
                    query: query.clone(),
                    created: Utc::now(),
                },
                Percept::Tool(response) => Event::ToolResponse {
                    response: response.clone(),
                    created: Utc::now(),
                },
            };
            self.events.push(event);
        }
    }

    /// Append the action returned by the reasoner: `User` actions become
    /// `Assistant` events, `Tool` actions become `ToolCalls` events.
    pub fn add_action(&mut self, action: &Action) {
        let event = match action {
            Action::User { content } => Event::Assistant {
                content: content.clone(),
                created: Utc::now(),
            },
            Action::Tool { calls, .. } => Event::ToolCalls {
                calls: calls.clone(),
                created: Utc::now(),
            },
        };
        self.events.push(event);
    }

    pub fn all(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::opera::action;
    use crate::opera::percept;

    #[test]
    fn append_grows_by_percepts_plus_one_action() {
        let mut h = History::new();
        h.add_system("be helpful");
        let before = h.len();

        let percepts = vec![percept::user(Query { text: "hi".into(), image: None })];
        h.add_percepts(&percepts);
        h.add_action(&action::user("hello back"));

        assert_eq!(h.len(), before + percepts.len() + 1);
    }

    #[test]
    fn first_event_is_system() {
        let mut h = History::new();
        h.add_system("be helpful");
        assert!(matches!(h.all()[0], Event::System { .. }));
    }
}
