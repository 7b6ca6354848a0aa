//! Tabular projections of the graph. Both matrices are rebuilt whole on
//! every refresh; cell edits re-enter as mutation intents through the bus,
//! never by poking another view.

use crate::GraphView;
use graphtool_core::Graph;
use serde::Serialize;

/// Square matrix keyed by node insertion order; 0 means no edge, anything
/// else is the edge weight. Undirected graphs mirror across the diagonal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AdjacencyMatrixView {
    pub headers: Vec<String>,
    pub cells: Vec<Vec<u32>>,
}

impl AdjacencyMatrixView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<u32> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }
}

impl GraphView for AdjacencyMatrixView {
    fn refresh(&mut self, graph: &Graph) {
        let nodes = graph.node_list();
        self.headers = nodes.iter().map(|n| n.name.clone()).collect();
        let index = |name: &str| self.headers.iter().position(|h| h == name);

        self.cells = vec![vec![0; nodes.len()]; nodes.len()];
        for edge in graph.edge_list() {
            if let (Some(i), Some(j)) = (index(&edge.u), index(&edge.v)) {
                self.cells[i][j] = edge.weight;
                if !graph.is_directed() {
                    self.cells[j][i] = edge.weight;
                }
            }
        }
    }
}

/// Rows are nodes, columns are edges. Undirected entries are 1 at both
/// endpoints; directed entries are -1 at the tail and 1 at the head.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IncidenceMatrixView {
    pub node_headers: Vec<String>,
    pub edge_headers: Vec<String>,
    pub cells: Vec<Vec<i8>>,
}

impl IncidenceMatrixView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphView for IncidenceMatrixView {
    fn refresh(&mut self, graph: &Graph) {
        let nodes = graph.node_list();
        let edges = graph.edge_list();
        self.node_headers = nodes.iter().map(|n| n.name.clone()).collect();
        self.edge_headers = edges
            .iter()
            .map(|e| format!("({}, {})", e.u, e.v))
            .collect();

        self.cells = vec![vec![0; edges.len()]; nodes.len()];
        for (col, edge) in edges.iter().enumerate() {
            let tail = self.node_headers.iter().position(|h| *h == edge.u);
            let head = self.node_headers.iter().position(|h| *h == edge.v);
            if let (Some(tail), Some(head)) = (tail, head) {
                if graph.is_directed() {
                    self.cells[tail][col] = -1;
                    self.cells[head][col] = 1;
                } else {
                    self.cells[tail][col] = 1;
                    self.cells[head][col] = 1;
                }
            }
        }
    }
}
