use thiserror::Error;

/// Reasons a Graph mutation can be rejected. Rejected mutations leave the
/// graph untouched; callers surface the message and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("invalid node name {0:?}: expected 1-3 alphanumeric characters")]
    InvalidName(String),
    #[error("a node named {0:?} already exists")]
    DuplicateName(String),
    #[error("no node named {0:?}")]
    UnknownNode(String),
    #[error("no edge between {0:?} and {1:?}")]
    UnknownEdge(String, String),
    #[error("self-loop on {0:?} rejected")]
    SelfLoop(String),
    #[error("edge weight must be at least 1, got {0}")]
    InvalidWeight(u32),
}
