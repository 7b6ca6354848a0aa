pub mod euler;
pub mod trace;
pub mod traversal;

pub use euler::eulerian_circuits;
pub use trace::{AlgorithmTrace, TraceStep};
pub use traversal::{bfs, depth_limited_dfs, dfs};

use thiserror::Error;

/// Algorithm preconditions that were not met. Surfaced to the user as a
/// message; never a panic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlgoError {
    #[error("no node named {0:?} to start from")]
    UnknownSource(String),
    #[error("graph has no Eulerian circuit: {0}")]
    NotEulerian(String),
}
