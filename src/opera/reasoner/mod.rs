//! The reasoner contract: an opaque LLM-backed collaborator mapping
//! (history, tools) to the next `Action`.

pub mod openai;

use async_trait::async_trait;

use crate::opera::action::Action;
use crate::opera::error::OperaError;
use crate::opera::history::History;
use crate::opera::tool::Tool;

pub use openai::OpenAiReasoner;

/// Given an immutable view of history and the current tools, produce
/// exactly one `Action`. Implementations must not mutate their inputs, must
/// return `Tool` with at least one call whenever they decide to dispatch,
/// and must return `User` otherwise.
#[async_trait]
pub trait Reasoner: Send + Sync {
    async fn reason(&self, history: &History, tools: &[Tool]) -> Result<Action, OperaError>;
}
