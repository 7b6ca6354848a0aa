use crate::{Edge, GraphError, Node, Vec2, is_valid_name};
use std::collections::HashMap;

const NAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// The authoritative in-memory graph: flags, nodes in insertion order, and
/// edges keyed by node name.
///
/// Every mutator either applies fully and returns `Ok(())` or rejects with a
/// [`GraphError`] and leaves the graph untouched. The graph itself never
/// notifies anyone; broadcasting one change event per successful mutation is
/// the owning workspace's job.
#[derive(Debug, Clone)]
pub struct Graph {
    directed: bool,
    weighted: bool,
    nodes: Vec<Node>,
    name_index: HashMap<String, usize>,
    edges: Vec<Edge>,
}

impl Graph {
    pub fn new(directed: bool, weighted: bool) -> Self {
        Self {
            directed,
            weighted,
            nodes: Vec::new(),
            name_index: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// New graph pre-populated with `count` auto-named nodes laid out on a
    /// circle, for the "create graph with N nodes" flow.
    pub fn with_nodes(count: usize, directed: bool, weighted: bool) -> Self {
        let mut graph = Self::new(directed, weighted);
        let radius = 200.0_f32;
        for i in 0..count {
            let angle = std::f32::consts::TAU * i as f32 / count.max(1) as f32;
            let pos = Vec2::new(radius * angle.cos(), radius * angle.sin());
            let name = graph.next_node_name();
            let _ = graph.add_node(&name, pos);
        }
        graph
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn has_node(&self, name: &str) -> bool {
        self.name_index.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.name_index.get(name).map(|&i| &self.nodes[i])
    }

    /// Nodes in insertion order. The order is stable across mutations of
    /// other nodes and is what every matrix projection keys on.
    pub fn node_list(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edge_list(&self) -> &[Edge] {
        &self.edges
    }

    fn edge_position(&self, u: &str, v: &str) -> Option<usize> {
        self.edges.iter().position(|e| {
            (e.u == u && e.v == v) || (!self.directed && e.u == v && e.v == u)
        })
    }

    pub fn has_edge(&self, u: &str, v: &str) -> bool {
        self.edge_position(u, v).is_some()
    }

    pub fn weight(&self, u: &str, v: &str) -> Option<u32> {
        self.edge_position(u, v).map(|i| self.edges[i].weight)
    }

    pub fn add_node(&mut self, name: &str, position: Vec2) -> Result<(), GraphError> {
        if !is_valid_name(name) {
            return Err(GraphError::InvalidName(name.to_string()));
        }
        if self.has_node(name) {
            return Err(GraphError::DuplicateName(name.to_string()));
        }
        self.name_index.insert(name.to_string(), self.nodes.len());
        self.nodes.push(Node::new(name, position));
        Ok(())
    }

    /// Removes the node and every incident edge.
    pub fn remove_node(&mut self, name: &str) -> Result<(), GraphError> {
        let index = *self
            .name_index
            .get(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))?;
        self.nodes.remove(index);
        self.edges.retain(|e| !e.touches(name));
        self.rebuild_index();
        Ok(())
    }

    /// Drops every edge incident to `name` but keeps the node.
    pub fn isolate_node(&mut self, name: &str) -> Result<(), GraphError> {
        if !self.has_node(name) {
            return Err(GraphError::UnknownNode(name.to_string()));
        }
        self.edges.retain(|e| !e.touches(name));
        Ok(())
    }

    /// Renames a node and rewrites the endpoint keys of every incident edge.
    pub fn set_node_name(&mut self, old: &str, new: &str) -> Result<(), GraphError> {
        if !is_valid_name(new) {
            return Err(GraphError::InvalidName(new.to_string()));
        }
        let index = *self
            .name_index
            .get(old)
            .ok_or_else(|| GraphError::UnknownNode(old.to_string()))?;
        if old == new {
            return Ok(());
        }
        if self.has_node(new) {
            return Err(GraphError::DuplicateName(new.to_string()));
        }
        self.nodes[index].name = new.to_string();
        self.name_index.remove(old);
        self.name_index.insert(new.to_string(), index);
        for edge in &mut self.edges {
            if edge.u == old {
                edge.u = new.to_string();
            }
            if edge.v == old {
                edge.v = new.to_string();
            }
        }
        Ok(())
    }

    pub fn set_node_position(&mut self, name: &str, position: Vec2) -> Result<(), GraphError> {
        let index = *self
            .name_index
            .get(name)
            .ok_or_else(|| GraphError::UnknownNode(name.to_string()))?;
        self.nodes[index].position = position;
        Ok(())
    }

    /// Creates the edge if absent, otherwise overwrites its weight.
    ///
    /// Self-loops are rejected uniformly. Unweighted graphs force the weight
    /// to 1 no matter what was requested; weighted graphs reject weight 0.
    pub fn set_edge(&mut self, u: &str, v: &str, weight: u32) -> Result<(), GraphError> {
        if !self.has_node(u) {
            return Err(GraphError::UnknownNode(u.to_string()));
        }
        if !self.has_node(v) {
            return Err(GraphError::UnknownNode(v.to_string()));
        }
        if u == v {
            return Err(GraphError::SelfLoop(u.to_string()));
        }
        let weight = if self.weighted {
            if weight < 1 {
                return Err(GraphError::InvalidWeight(weight));
            }
            weight
        } else {
            1
        };
        match self.edge_position(u, v) {
            Some(i) => self.edges[i].weight = weight,
            None => self.edges.push(Edge::new(u, v, weight)),
        }
        Ok(())
    }

    pub fn remove_edge(&mut self, u: &str, v: &str) -> Result<(), GraphError> {
        match self.edge_position(u, v) {
            Some(i) => {
                self.edges.remove(i);
                Ok(())
            }
            None => Err(GraphError::UnknownEdge(u.to_string(), v.to_string())),
        }
    }

    /// Neighbors reachable from `name` in edge insertion order, with the
    /// connecting edge's other endpoint. For directed graphs these are the
    /// successors only.
    pub fn neighbors(&self, name: &str) -> Vec<&str> {
        let mut out = Vec::new();
        for edge in &self.edges {
            if edge.u == name {
                out.push(edge.v.as_str());
            } else if !self.directed && edge.v == name {
                out.push(edge.u.as_str());
            }
        }
        out
    }

    pub fn out_degree(&self, name: &str) -> usize {
        if self.directed {
            self.edges.iter().filter(|e| e.u == name).count()
        } else {
            self.degree(name)
        }
    }

    pub fn in_degree(&self, name: &str) -> usize {
        if self.directed {
            self.edges.iter().filter(|e| e.v == name).count()
        } else {
            self.degree(name)
        }
    }

    /// Undirected: incident edge count. Directed: in-degree + out-degree.
    pub fn degree(&self, name: &str) -> usize {
        if self.directed {
            self.in_degree(name) + self.out_degree(name)
        } else {
            self.edges.iter().filter(|e| e.touches(name)).count()
        }
    }

    pub fn degree_sum(&self) -> usize {
        self.nodes.iter().map(|n| self.degree(&n.name)).sum()
    }

    /// Smallest unused name in the fixed generation sequence: `a..z`,
    /// `0..9`, then two- and three-character combinations over the same
    /// alphabet. A deterministic suggestion, never enforced. Returns an
    /// empty string only if the whole three-character namespace is taken.
    pub fn next_node_name(&self) -> String {
        for len in 1..=3usize {
            let mut indices = vec![0usize; len];
            loop {
                let candidate: String = indices
                    .iter()
                    .map(|&i| NAME_ALPHABET[i] as char)
                    .collect();
                if !self.has_node(&candidate) {
                    return candidate;
                }
                // lexicographic increment over the alphabet
                let mut pos = len;
                loop {
                    if pos == 0 {
                        break;
                    }
                    pos -= 1;
                    indices[pos] += 1;
                    if indices[pos] < NAME_ALPHABET.len() {
                        break;
                    }
                    indices[pos] = 0;
                }
                if indices.iter().all(|&i| i == 0) {
                    break;
                }
            }
        }
        String::new()
    }

    fn rebuild_index(&mut self) {
        self.name_index = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.name.clone(), i))
            .collect();
    }
}

impl PartialEq for Graph {
    fn eq(&self, other: &Self) -> bool {
        self.directed == other.directed
            && self.weighted == other.weighted
            && self.nodes == other.nodes
            && self.edges == other.edges
    }
}
