//! Canvas-side state: current selection plus the transient highlight flags
//! driven by demo playback. Highlight state is never persisted and never
//! feeds back into the graph model.

use graphtool_algo::TraceStep;
use graphtool_core::{Edge, Graph, Node, Selectable, Vec2};
use std::collections::HashSet;

/// Render sink the canvas pushes draw calls into. The real widget behind it
/// owns shapes, colors, and zoom; the scene only describes what to draw.
pub trait CanvasSink {
    fn clear(&mut self);
    fn draw_node(&mut self, node: &Node, selected: bool, highlighted: bool);
    fn draw_edge(&mut self, edge: &Edge, from: Vec2, to: Vec2, selected: bool, highlighted: bool);
}

#[derive(Debug, Default)]
pub struct CanvasScene {
    selection: Option<Selectable>,
    highlighted_nodes: HashSet<String>,
    highlighted_edges: HashSet<(String, String)>,
}

impl CanvasScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selectable> {
        self.selection.as_ref()
    }

    pub fn set_selection(&mut self, selection: Selectable) {
        self.selection = Some(selection);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn is_node_highlighted(&self, name: &str) -> bool {
        self.highlighted_nodes.contains(name)
    }

    /// Orientation-insensitive: a highlight on (u, v) also lights (v, u).
    pub fn is_edge_highlighted(&self, u: &str, v: &str) -> bool {
        self.highlighted_edges
            .contains(&(u.to_string(), v.to_string()))
            || self
                .highlighted_edges
                .contains(&(v.to_string(), u.to_string()))
    }

    pub fn has_highlights(&self) -> bool {
        !self.highlighted_nodes.is_empty() || !self.highlighted_edges.is_empty()
    }

    /// Rolling single-group reveal: drop the previous group's highlight and
    /// apply this step's.
    pub fn highlight_step(&mut self, step: &TraceStep) {
        self.clear_highlights();
        for name in step.nodes() {
            self.highlighted_nodes.insert(name.clone());
        }
        for (u, v) in step.edges() {
            self.highlighted_edges.insert((u.to_string(), v.to_string()));
        }
    }

    pub fn clear_highlights(&mut self) {
        self.highlighted_nodes.clear();
        self.highlighted_edges.clear();
    }

    /// Pushes the full scene to the sink: every node at its model position,
    /// every edge between its endpoints, with selection and highlight flags.
    pub fn render(&self, graph: &Graph, sink: &mut dyn CanvasSink) {
        sink.clear();
        for edge in graph.edge_list() {
            let (Some(u), Some(v)) = (graph.node(&edge.u), graph.node(&edge.v)) else {
                tracing::warn!("edge ({}, {}) has a missing endpoint", edge.u, edge.v);
                continue;
            };
            let selected = matches!(
                &self.selection,
                Some(Selectable::Edge(su, sv))
                    if (su == &edge.u && sv == &edge.v) || (su == &edge.v && sv == &edge.u)
            );
            let highlighted = self.is_edge_highlighted(&edge.u, &edge.v);
            sink.draw_edge(edge, u.position, v.position, selected, highlighted);
        }
        for node in graph.node_list() {
            let selected = matches!(
                &self.selection,
                Some(Selectable::Node(name)) if name == &node.name
            );
            sink.draw_node(node, selected, self.is_node_highlighted(&node.name));
        }
    }
}
