//! The `.gph` text format.
//!
//! ```text
//! <directed:0|1> <weighted:0|1>
//! <node_count>
//! <name> <x> <y>        one line per node, insertion order
//! <edge_count>
//! <u> <v> <weight>      one line per edge
//! ```
//!
//! Blank lines and lines starting with `#` are ignored on read. Reading is
//! all-or-nothing: the file is parsed into a staging form and replayed
//! through the graph model's own mutators, so a file that violates any model
//! invariant produces an error and no graph.

use graphtool_core::{Graph, GraphError, Vec2};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FileError {
    #[error("cannot access {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed graph file (line {line}): {reason}")]
    Malformed { line: usize, reason: String },
    #[error("graph file violates model invariants: {0}")]
    Invalid(#[from] GraphError),
}

/// Serializes the graph in the stable `.gph` layout. Writing then reading
/// yields an equal graph: same flags, node order, positions, and weights.
pub fn write_graph(path: &Path, graph: &Graph) -> Result<(), FileError> {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        graph.is_directed() as u8,
        graph.is_weighted() as u8
    ));
    out.push_str(&format!("{}\n", graph.node_count()));
    for node in graph.node_list() {
        out.push_str(&format!(
            "{} {} {}\n",
            node.name, node.position.x, node.position.y
        ));
    }
    out.push_str(&format!("{}\n", graph.edge_count()));
    for edge in graph.edge_list() {
        out.push_str(&format!("{} {} {}\n", edge.u, edge.v, edge.weight));
    }
    fs::write(path, out).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn read_graph(path: &Path) -> Result<Graph, FileError> {
    let text = fs::read_to_string(path).map_err(|source| FileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let graph = parse_graph(&text)?;
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "loaded graph from {:?}",
        path
    );
    Ok(graph)
}

fn parse_graph(text: &str) -> Result<Graph, FileError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let mut next_line = |what: &str| {
        lines
            .next()
            .ok_or_else(|| FileError::Malformed {
                line: 0,
                reason: format!("unexpected end of file, expected {what}"),
            })
    };

    let (line_no, header) = next_line("graph flags")?;
    let (directed, weighted) = parse_flags(line_no, header)?;

    let (line_no, count) = next_line("node count")?;
    let node_count = parse_count(line_no, count, "node count")?;
    // cap the pre-allocation: the count is untrusted until the lines back it up
    let mut nodes = Vec::with_capacity(node_count.min(1024));
    for _ in 0..node_count {
        let (line_no, line) = next_line("a node line")?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [name, x, y] = fields[..] else {
            return Err(FileError::Malformed {
                line: line_no,
                reason: format!("expected `name x y`, got {line:?}"),
            });
        };
        let x = parse_coord(line_no, x)?;
        let y = parse_coord(line_no, y)?;
        nodes.push((name.to_string(), Vec2::new(x, y)));
    }

    let (line_no, count) = next_line("edge count")?;
    let edge_count = parse_count(line_no, count, "edge count")?;
    let mut edges = Vec::with_capacity(edge_count.min(1024));
    for _ in 0..edge_count {
        let (line_no, line) = next_line("an edge line")?;
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [u, v, w] = fields[..] else {
            return Err(FileError::Malformed {
                line: line_no,
                reason: format!("expected `u v weight`, got {line:?}"),
            });
        };
        let weight: u32 = w.parse().map_err(|_| FileError::Malformed {
            line: line_no,
            reason: format!("bad edge weight {w:?}"),
        })?;
        edges.push((u.to_string(), v.to_string(), weight));
    }

    // replay through the model so every invariant is enforced once, here
    let mut graph = Graph::new(directed, weighted);
    for (name, position) in nodes {
        graph.add_node(&name, position)?;
    }
    for (u, v, weight) in edges {
        graph.set_edge(&u, &v, weight)?;
    }
    Ok(graph)
}

fn parse_flags(line: usize, text: &str) -> Result<(bool, bool), FileError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    let [directed, weighted] = fields[..] else {
        return Err(FileError::Malformed {
            line,
            reason: format!("expected `directed weighted` flags, got {text:?}"),
        });
    };
    Ok((parse_flag(line, directed)?, parse_flag(line, weighted)?))
}

fn parse_flag(line: usize, text: &str) -> Result<bool, FileError> {
    match text {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(FileError::Malformed {
            line,
            reason: format!("flag must be 0 or 1, got {other:?}"),
        }),
    }
}

fn parse_count(line: usize, text: &str, what: &str) -> Result<usize, FileError> {
    text.parse().map_err(|_| FileError::Malformed {
        line,
        reason: format!("bad {what} {text:?}"),
    })
}

fn parse_coord(line: usize, text: &str) -> Result<f32, FileError> {
    text.parse().map_err(|_| FileError::Malformed {
        line,
        reason: format!("bad coordinate {text:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    fn sample() -> Graph {
        let mut g = Graph::new(true, true);
        g.add_node("a", Vec2::new(-3.5, 0.25)).unwrap();
        g.add_node("b", Vec2::new(10.0, 20.0)).unwrap();
        g.add_node("X9", Vec2::new(0.0, -7.125)).unwrap();
        g.set_edge("a", "b", 4).unwrap();
        g.set_edge("b", "X9", 1).unwrap();
        g
    }

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("g.gph");
        let graph = sample();
        write_graph(&path, &graph).unwrap();
        let loaded = read_graph(&path).unwrap();
        assert_eq!(loaded, graph);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_graph(&dir.path().join("nope.gph")).unwrap_err();
        assert!(matches!(err, FileError::Io { .. }));
    }

    #[test]
    fn test_comments_and_blank_lines_ignored() {
        let text = "# a graph\n\n0 0\n2\na 0 0\n\nb 1 1\n1\na b 1\n";
        let graph = parse_graph(text).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert!(graph.has_edge("a", "b"));
    }

    #[test]
    fn test_truncated_file() {
        let err = parse_graph("0 0\n3\na 0 0\n").unwrap_err();
        assert!(matches!(err, FileError::Malformed { .. }));
    }

    #[test]
    fn test_absurd_node_count_is_malformed() {
        // a count far beyond the file's contents must not be trusted with
        // an allocation; it reads as a truncated file
        let err = parse_graph("0 0\n999999999999999999\n").unwrap_err();
        assert!(matches!(err, FileError::Malformed { .. }));

        let err = parse_graph("0 0\n1\na 0 0\n999999999999999999\n").unwrap_err();
        assert!(matches!(err, FileError::Malformed { .. }));
    }

    #[test]
    fn test_bad_flags() {
        assert!(matches!(
            parse_graph("2 0\n0\n0\n"),
            Err(FileError::Malformed { .. })
        ));
        assert!(matches!(
            parse_graph("yes no\n0\n0\n"),
            Err(FileError::Malformed { .. })
        ));
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let text = "0 0\n2\na 0 0\na 1 1\n0\n";
        assert!(matches!(
            parse_graph(text),
            Err(FileError::Invalid(GraphError::DuplicateName(_)))
        ));
    }

    #[test]
    fn test_edge_to_unknown_node_rejected() {
        let text = "0 0\n1\na 0 0\n1\na z 1\n";
        assert!(matches!(
            parse_graph(text),
            Err(FileError::Invalid(GraphError::UnknownNode(_)))
        ));
    }

    #[test]
    fn test_zero_weight_on_weighted_graph_rejected() {
        let text = "0 1\n2\na 0 0\nb 1 1\n1\na b 0\n";
        assert!(matches!(
            parse_graph(text),
            Err(FileError::Invalid(GraphError::InvalidWeight(0)))
        ));
    }

    proptest! {
        #[test]
        fn prop_round_trip(
            directed: bool,
            weighted: bool,
            node_count in 1usize..12,
            xs in proptest::collection::vec(-1000.0f32..1000.0, 12),
            ys in proptest::collection::vec(-1000.0f32..1000.0, 12),
            edge_picks in proptest::collection::vec((0usize..12, 0usize..12, 1u32..100), 0..20),
        ) {
            let mut graph = Graph::new(directed, weighted);
            for i in 0..node_count {
                let name = graph.next_node_name();
                graph.add_node(&name, Vec2::new(xs[i], ys[i])).unwrap();
            }
            let names: Vec<String> =
                graph.node_list().iter().map(|n| n.name.clone()).collect();
            for (ui, vi, w) in edge_picks {
                let (u, v) = (&names[ui % node_count], &names[vi % node_count]);
                if u != v {
                    graph.set_edge(u, v, w).unwrap();
                }
            }

            let dir = tempdir().unwrap();
            let path = dir.path().join("g.gph");
            write_graph(&path, &graph).unwrap();
            let loaded = read_graph(&path).unwrap();
            prop_assert_eq!(loaded, graph);
        }
    }
}
