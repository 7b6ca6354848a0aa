//! Eulerian circuit enumeration via Hierholzer's edge-following walks.

use crate::{AlgoError, AlgorithmTrace, TraceStep};
use graphtool_core::Graph;
use std::collections::HashSet;

/// Enumerates Eulerian circuits as closed walks that together use every edge
/// exactly once.
///
/// Qualification is checked first: the graph must have at least one edge,
/// every vertex must have even degree (undirected) or equal in- and
/// out-degree (directed), and all edges must lie in one connected component.
/// A disqualified graph yields [`AlgoError::NotEulerian`] with the reason.
///
/// Closed sub-walks are reported in discovery order, one `NodeGroup` +
/// `EdgeGroup` pair per walk; merging them at shared vertices gives a single
/// circuit over the whole edge set.
pub fn eulerian_circuits(graph: &Graph) -> Result<AlgorithmTrace, AlgoError> {
    qualify(graph)?;

    let edges = graph.edge_list();
    let mut used = vec![false; edges.len()];
    let mut steps = Vec::new();

    // Vertices already on a discovered walk, in discovery order. The first
    // walk starts at the first node (insertion order) with an edge.
    let mut anchors: Vec<String> = Vec::new();
    let start = graph
        .node_list()
        .iter()
        .map(|n| n.name.clone())
        .find(|n| graph.degree(n) > 0)
        .ok_or_else(|| AlgoError::NotEulerian("graph has no edges".to_string()))?;
    anchors.push(start);

    while used.iter().any(|u| !u) {
        let Some(from) = anchors
            .iter()
            .find(|a| next_unused(graph, &used, a).is_some())
            .cloned()
        else {
            // cannot happen on a qualified graph; guard instead of looping
            tracing::warn!("unused edges left with no reachable anchor");
            break;
        };

        let (walk_nodes, walk_edges) = close_walk(graph, &mut used, &from);
        for name in &walk_nodes {
            if !anchors.contains(name) {
                anchors.push(name.clone());
            }
        }
        steps.push(TraceStep::NodeGroup(walk_nodes));
        steps.push(TraceStep::EdgeGroup(walk_edges));
    }

    Ok(AlgorithmTrace::new(steps))
}

fn qualify(graph: &Graph) -> Result<(), AlgoError> {
    if graph.edge_count() == 0 {
        return Err(AlgoError::NotEulerian("graph has no edges".to_string()));
    }
    for node in graph.node_list() {
        if graph.is_directed() {
            if graph.in_degree(&node.name) != graph.out_degree(&node.name) {
                return Err(AlgoError::NotEulerian(format!(
                    "node {:?} has in-degree {} but out-degree {}",
                    node.name,
                    graph.in_degree(&node.name),
                    graph.out_degree(&node.name)
                )));
            }
        } else if graph.degree(&node.name) % 2 != 0 {
            return Err(AlgoError::NotEulerian(format!(
                "node {:?} has odd degree {}",
                node.name,
                graph.degree(&node.name)
            )));
        }
    }
    if !edges_connected(graph) {
        return Err(AlgoError::NotEulerian(
            "edges are not all in one connected component".to_string(),
        ));
    }
    Ok(())
}

/// Every vertex with at least one incident edge must be reachable from any
/// other, ignoring edge direction.
fn edges_connected(graph: &Graph) -> bool {
    let carriers: Vec<&str> = graph
        .node_list()
        .iter()
        .map(|n| n.name.as_str())
        .filter(|n| graph.degree(n) > 0)
        .collect();
    let Some(&first) = carriers.first() else {
        return true;
    };

    let mut seen: HashSet<&str> = HashSet::from([first]);
    let mut stack = vec![first];
    while let Some(u) = stack.pop() {
        for edge in graph.edge_list() {
            let other = if edge.u == u {
                Some(edge.v.as_str())
            } else if edge.v == u {
                Some(edge.u.as_str())
            } else {
                None
            };
            if let Some(v) = other {
                if seen.insert(v) {
                    stack.push(v);
                }
            }
        }
    }
    carriers.iter().all(|n| seen.contains(n))
}

/// First unused edge incident to `at`, honoring direction for directed
/// graphs. Returns the edge index and the far endpoint.
fn next_unused<'g>(graph: &'g Graph, used: &[bool], at: &str) -> Option<(usize, &'g str)> {
    graph.edge_list().iter().enumerate().find_map(|(i, edge)| {
        if used[i] {
            return None;
        }
        if edge.u == at {
            Some((i, edge.v.as_str()))
        } else if !graph.is_directed() && edge.v == at {
            Some((i, edge.u.as_str()))
        } else {
            None
        }
    })
}

/// Follows unused edges from `from` until the walk closes. On a qualified
/// graph the walk can only get stuck back at its starting vertex.
fn close_walk(
    graph: &Graph,
    used: &mut [bool],
    from: &str,
) -> (Vec<String>, Vec<(String, String)>) {
    let mut nodes = vec![from.to_string()];
    let mut edges = Vec::new();
    let mut at = from.to_string();
    while let Some((index, next)) = next_unused(graph, used, &at) {
        used[index] = true;
        edges.push((at.clone(), next.to_string()));
        nodes.push(next.to_string());
        at = next.to_string();
    }
    (nodes, edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphtool_core::Vec2;

    fn graph(directed: bool, edges: &[(&str, &str)]) -> Graph {
        let mut g = Graph::new(directed, false);
        for (u, v) in edges {
            if !g.has_node(u) {
                g.add_node(u, Vec2::default()).unwrap();
            }
            if !g.has_node(v) {
                g.add_node(v, Vec2::default()).unwrap();
            }
            g.set_edge(u, v, 1).unwrap();
        }
        g
    }

    #[test]
    fn test_four_cycle_single_circuit() {
        let g = graph(false, &[("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
        let trace = eulerian_circuits(&g).unwrap();
        // exactly one circuit: one node group + one edge group
        assert_eq!(trace.len(), 2);
        match &trace.steps()[1] {
            TraceStep::EdgeGroup(edges) => {
                assert_eq!(edges.len(), 4);
                assert_eq!(edges[0].0, "A");
                assert_eq!(edges[3].1, "A");
            }
            other => panic!("expected EdgeGroup, got {other:?}"),
        }
    }

    #[test]
    fn test_odd_degree_disqualifies() {
        let g = graph(false, &[("A", "B"), ("B", "C")]);
        assert!(matches!(
            eulerian_circuits(&g),
            Err(AlgoError::NotEulerian(_))
        ));
    }

    #[test]
    fn test_no_edges_disqualifies() {
        let mut g = Graph::new(false, false);
        g.add_node("A", Vec2::default()).unwrap();
        assert!(matches!(
            eulerian_circuits(&g),
            Err(AlgoError::NotEulerian(_))
        ));
    }

    #[test]
    fn test_disconnected_edge_sets_disqualify() {
        // two disjoint triangles: every degree even, but edges span two
        // components
        let g = graph(
            false,
            &[
                ("A", "B"),
                ("B", "C"),
                ("C", "A"),
                ("D", "E"),
                ("E", "F"),
                ("F", "D"),
            ],
        );
        assert!(matches!(
            eulerian_circuits(&g),
            Err(AlgoError::NotEulerian(_))
        ));
    }

    #[test]
    fn test_figure_eight_reports_two_walks() {
        // two triangles sharing vertex B: Hierholzer closes the first walk
        // at A before picking up the second loop at B
        let g = graph(
            false,
            &[
                ("A", "B"),
                ("B", "C"),
                ("C", "A"),
                ("B", "D"),
                ("D", "E"),
                ("E", "B"),
            ],
        );
        let trace = eulerian_circuits(&g).unwrap();
        assert_eq!(trace.len(), 4);
        let edge_groups: Vec<_> = trace
            .steps()
            .iter()
            .filter_map(|s| match s {
                TraceStep::EdgeGroup(e) => Some(e.len()),
                _ => None,
            })
            .collect();
        assert_eq!(edge_groups, vec![3, 3]);
    }

    #[test]
    fn test_directed_cycle() {
        let g = graph(true, &[("A", "B"), ("B", "C"), ("C", "A")]);
        let trace = eulerian_circuits(&g).unwrap();
        assert_eq!(trace.len(), 2);

        // reversing one arc breaks the in/out balance
        let g = graph(true, &[("A", "B"), ("B", "C"), ("A", "C")]);
        assert!(matches!(
            eulerian_circuits(&g),
            Err(AlgoError::NotEulerian(_))
        ));
    }

    #[test]
    fn test_every_edge_used_exactly_once() {
        let g = graph(
            false,
            &[
                ("A", "B"),
                ("B", "C"),
                ("C", "D"),
                ("D", "A"),
                ("A", "C"),
                ("C", "E"),
                ("E", "A"),
            ],
        );
        let trace = eulerian_circuits(&g).unwrap();
        let total: usize = trace
            .steps()
            .iter()
            .filter_map(|s| match s {
                TraceStep::EdgeGroup(e) => Some(e.len()),
                _ => None,
            })
            .sum();
        assert_eq!(total, g.edge_count());
    }
}
