pub mod error;
pub mod graph;
pub mod node;

pub use error::GraphError;
pub use graph::Graph;
pub use node::{Edge, Node, Vec2};

use serde::{Deserialize, Serialize};

/// Tagged reference to a selectable canvas element.
///
/// Resolved once at the input-handling boundary; everything downstream
/// dispatches on the tag instead of probing item types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selectable {
    Node(String),
    Edge(String, String),
}

/// Node names are 1-3 ASCII alphanumeric characters, case-sensitive.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= 3 && name.chars().all(|c| c.is_ascii_alphanumeric())
}
