//! Breadth-first, depth-first, and depth-limited traversals over the name-
//! keyed graph model. Neighbor order is always edge insertion order, so a
//! given graph replays the same trace every time.

use crate::{AlgoError, AlgorithmTrace, TraceStep};
use graphtool_core::Graph;
use std::collections::{HashSet, VecDeque};

/// Breadth-first layering from `source`.
///
/// The trace carries, per layer, the group of edges used to reach the layer
/// followed by the group of nodes newly visited, in increasing distance
/// order. Unreachable nodes are omitted.
pub fn bfs(graph: &Graph, source: &str) -> Result<AlgorithmTrace, AlgoError> {
    if !graph.has_node(source) {
        return Err(AlgoError::UnknownSource(source.to_string()));
    }

    let mut steps = vec![TraceStep::NodeGroup(vec![source.to_string()])];
    let mut visited: HashSet<String> = HashSet::from([source.to_string()]);
    let mut frontier: Vec<String> = vec![source.to_string()];

    while !frontier.is_empty() {
        let mut next_nodes = Vec::new();
        let mut next_edges = Vec::new();
        for u in &frontier {
            for v in graph.neighbors(u) {
                if visited.insert(v.to_string()) {
                    next_edges.push((u.clone(), v.to_string()));
                    next_nodes.push(v.to_string());
                }
            }
        }
        if next_nodes.is_empty() {
            break;
        }
        steps.push(TraceStep::EdgeGroup(next_edges));
        steps.push(TraceStep::NodeGroup(next_nodes.clone()));
        frontier = next_nodes;
    }

    Ok(AlgorithmTrace::new(steps))
}

/// Depth-first exploration from `source`; nodes in visitation order with the
/// tree edge traversed before each newly discovered node.
pub fn dfs(graph: &Graph, source: &str) -> Result<AlgorithmTrace, AlgoError> {
    if !graph.has_node(source) {
        return Err(AlgoError::UnknownSource(source.to_string()));
    }

    let mut steps = vec![TraceStep::NodeVisited(source.to_string())];
    let mut visited: HashSet<String> = HashSet::from([source.to_string()]);
    dfs_visit(graph, source, &mut visited, &mut steps);
    Ok(AlgorithmTrace::new(steps))
}

fn dfs_visit(graph: &Graph, u: &str, visited: &mut HashSet<String>, steps: &mut Vec<TraceStep>) {
    for v in graph.neighbors(u) {
        if visited.insert(v.to_string()) {
            steps.push(TraceStep::EdgeTraversed(u.to_string(), v.to_string()));
            steps.push(TraceStep::NodeVisited(v.to_string()));
            dfs_visit(graph, v, visited, steps);
        }
    }
}

/// Depth-first exploration that does not descend past `max_depth` edges from
/// `source`. Depth 0 visits only the source. Returns visited names in DFS
/// order; unreachable or too-deep nodes are simply absent.
pub fn depth_limited_dfs(
    graph: &Graph,
    source: &str,
    max_depth: usize,
) -> Result<Vec<String>, AlgoError> {
    if !graph.has_node(source) {
        return Err(AlgoError::UnknownSource(source.to_string()));
    }

    let mut visited: HashSet<String> = HashSet::from([source.to_string()]);
    let mut order = vec![source.to_string()];
    limited_visit(graph, source, max_depth, &mut visited, &mut order);
    Ok(order)
}

fn limited_visit(
    graph: &Graph,
    u: &str,
    depth_left: usize,
    visited: &mut HashSet<String>,
    order: &mut Vec<String>,
) {
    if depth_left == 0 {
        return;
    }
    for v in graph.neighbors(u) {
        if visited.insert(v.to_string()) {
            order.push(v.to_string());
            limited_visit(graph, v, depth_left - 1, visited, order);
        }
    }
}

/// Distance map used by tests and the BFS layering property: plain BFS
/// without trace bookkeeping.
pub fn distances(graph: &Graph, source: &str) -> Result<Vec<(String, usize)>, AlgoError> {
    if !graph.has_node(source) {
        return Err(AlgoError::UnknownSource(source.to_string()));
    }
    let mut dist = vec![(source.to_string(), 0usize)];
    let mut seen: HashSet<String> = HashSet::from([source.to_string()]);
    let mut queue: VecDeque<(String, usize)> = VecDeque::from([(source.to_string(), 0)]);
    while let Some((u, d)) = queue.pop_front() {
        for v in graph.neighbors(&u) {
            if seen.insert(v.to_string()) {
                dist.push((v.to_string(), d + 1));
                queue.push_back((v.to_string(), d + 1));
            }
        }
    }
    Ok(dist)
}
