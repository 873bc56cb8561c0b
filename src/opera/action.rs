//! The reasoner's per-turn decision: answer the user, or dispatch tool calls.

use serde::{Deserialize, Serialize};

/// A single tool invocation request emitted by the reasoner.
///
/// `arguments` is an opaque JSON document the orchestrator never parses;
/// `id` is the reasoner-assigned correlation token a later `Response` must
/// echo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Call {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// Tagged union: either a final answer to the user, or a set of tool calls
/// to dispatch. Exactly one variant is ever held.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    User { content: String },
    Tool { calls: Vec<Call>, reason: Option<String> },
}

/// Build a `User` action.
pub fn user(content: impl Into<String>) -> Action {
    Action::User { content: content.into() }
}

/// Build a `Tool` action. Does not itself enforce the "at least one call"
/// invariant — callers that decode reasoner output are responsible for
/// rejecting an empty `calls` vec (the engine does this, see `engine.rs`).
pub fn tool(calls: Vec<Call>, reason: Option<String>) -> Action {
    Action::Tool { calls, reason }
}

impl Action {
    /// `Some(content)` if this is a `User` action, `None` otherwise.
    pub fn user(&self) -> Option<&str> {
        match self {
            Action::User { content } => Some(content),
            Action::Tool { .. } => None,
        }
    }

    /// `Some((calls, reason))` if this is a `Tool` action, `None` otherwise.
    pub fn tool(&self) -> Option<(&[Call], Option<&str>)> {
        match self {
            Action::Tool { calls, reason } => Some((calls, reason.as_deref())),
            Action::User { .. } => None,
        }
    }
}
