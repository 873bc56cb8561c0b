// src/lib.rs

pub mod opera;

pub use opera::action::Action;
pub use opera::agent::Agent;
pub use opera::engine::Engine;
pub use opera::error::OperaError;
pub use opera::history::History;
pub use opera::percept::Percept;
pub use opera::tool::Tool;
