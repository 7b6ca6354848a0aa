use serde::{Deserialize, Serialize};

/// One demo step. A step is the unit the playback engine reveals per tick:
/// single-element steps for DFS-style traces, batched groups for BFS layers
/// and Eulerian circuits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceStep {
    NodeVisited(String),
    EdgeTraversed(String, String),
    NodeGroup(Vec<String>),
    EdgeGroup(Vec<(String, String)>),
}

impl TraceStep {
    /// Node names highlighted by this step.
    pub fn nodes(&self) -> &[String] {
        match self {
            TraceStep::NodeVisited(name) => std::slice::from_ref(name),
            TraceStep::NodeGroup(names) => names,
            _ => &[],
        }
    }

    /// Edge endpoint pairs highlighted by this step.
    pub fn edges(&self) -> Vec<(&str, &str)> {
        match self {
            TraceStep::EdgeTraversed(u, v) => vec![(u.as_str(), v.as_str())],
            TraceStep::EdgeGroup(pairs) => {
                pairs.iter().map(|(u, v)| (u.as_str(), v.as_str())).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Ordered, finite, replayable record of an algorithm run. Produced once by
/// an algorithm, immutable afterwards, consumed by the playback engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlgorithmTrace {
    steps: Vec<TraceStep>,
}

impl AlgorithmTrace {
    pub fn new(steps: Vec<TraceStep>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[TraceStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromIterator<TraceStep> for AlgorithmTrace {
    fn from_iter<T: IntoIterator<Item = TraceStep>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
