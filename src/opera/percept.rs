//! Inputs fed into the reasoner: the initial user query, or a tool result.

use serde::{Deserialize, Serialize};

/// The user's query text, with an optional image attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Query {
    pub text: String,
    pub image: Option<String>,
}

/// A tool's textual result, correlated back to its originating `Call` by id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Response {
    pub id: String,
    pub content: String,
}

/// Tagged union: either the initial user query, or a tool response.
/// The Actor produces only `Tool` percepts; the engine injects the initial
/// `User` percept from the incoming query.
#[derive(Debug, Clone, PartialEq)]
pub enum Percept {
    User(Query),
    Tool(Response),
}

pub fn user(query: Query) -> Percept {
    Percept::User(query)
}

pub fn tool(call_id: impl Into<String>, content: impl Into<String>) -> Percept {
    Percept::Tool(Response {
        id: call_id.into(),
        content: content.into(),
    })
}

impl Percept {
    pub fn user(&self) -> Option<&Query> {
        match self {
            Percept::User(q) => Some(q),
            Percept::Tool(_) => None,
        }
    }

    pub fn tool(&self) -> Option<&Response> {
        match self {
            Percept::Tool(r) => Some(r),
            Percept::User(_) => None,
        }
    }
}
