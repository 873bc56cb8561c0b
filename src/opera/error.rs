//! The orchestrator's single error type.
//!
//! Every subsystem (registry, discovery, actor, agent, engine, store) returns
//! `Result<_, OperaError>`. Composite failures — a fan-out where more than
//! one worker failed — are folded into [`OperaError::Joined`], the Rust
//! analogue of Go's `errors.Join`.

use std::error::Error;
use std::fmt;

/// Error kinds produced by the orchestration core.
#[derive(Debug, Clone)]
pub enum OperaError {
    /// A `Tool` failed construction because a mandatory field was empty.
    InvalidTool(String),
    /// A lookup (registry, store) found no entry for the given key.
    NotFound(String),
    /// An insert collided with an existing entry.
    AlreadyExists(String),
    /// An agent ID failed the `age-<token>` syntactic check.
    InvalidId(String),
    /// A registry `Get` was called with an empty name.
    InvalidName,
    /// An unexpected internal condition; carries an opaque message.
    Internal(String),
    /// An HTTP/network failure talking to a tool service or discovery target.
    Transport(String),
    /// The reasoner returned a malformed or unusable response.
    Reasoner(String),
    /// The engine exhausted its iteration budget without a `User` action.
    MaxIterations(usize),
    /// Sentinel absorbed by Discovery when a container is not a tool candidate.
    NotATool,
    /// The ambient context was cancelled before the operation completed.
    Cancelled,
    /// Multiple errors collected from a concurrent fan-out.
    Joined(Vec<OperaError>),
}

impl OperaError {
    /// Build a `Joined` error from a set of failures, flattening any nested
    /// `Joined` values so the composite never nests more than one level deep.
    pub fn join(errors: Vec<OperaError>) -> OperaError {
        let mut flat = Vec::with_capacity(errors.len());
        for e in errors {
            match e {
                OperaError::Joined(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        OperaError::Joined(flat)
    }
}

impl fmt::Display for OperaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperaError::InvalidTool(msg) => write!(f, "invalid tool: {}", msg),
            OperaError::NotFound(what) => write!(f, "not found: {}", what),
            OperaError::AlreadyExists(what) => write!(f, "already exists: {}", what),
            OperaError::InvalidId(id) => write!(f, "invalid id: {}", id),
            OperaError::InvalidName => write!(f, "invalid name: empty"),
            OperaError::Internal(msg) => write!(f, "internal error: {}", msg),
            OperaError::Transport(msg) => write!(f, "transport error: {}", msg),
            OperaError::Reasoner(msg) => write!(f, "reasoner error: {}", msg),
            OperaError::MaxIterations(n) => write!(f, "reached max iterations {}", n),
            OperaError::NotATool => write!(f, "not a tool candidate"),
            OperaError::Cancelled => write!(f, "cancelled"),
            OperaError::Joined(errors) => {
                writeln!(f, "{} errors occurred:", errors.len())?;
                for e in errors {
                    writeln!(f, "\t* {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl Error for OperaError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_flattens_nested_joined() {
        let inner = OperaError::join(vec![
            OperaError::NotFound("a".into()),
            OperaError::NotFound("b".into()),
        ]);
        let outer = OperaError::join(vec![inner, OperaError::Cancelled]);
        match outer {
            OperaError::Joined(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected Joined, got {:?}", other),
        }
    }

    #[test]
    fn display_lists_each_inner_error() {
        let err = OperaError::join(vec![OperaError::NotATool, OperaError::Cancelled]);
        let rendered = err.to_string();
        assert!(rendered.contains("2 errors occurred"));
        assert!(rendered.contains("not a tool candidate"));
        assert!(rendered.contains("cancelled"));
    }
}
