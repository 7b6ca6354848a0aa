//! Property-list projections: whole-graph summary and the currently
//! selected element.

use crate::GraphView;
use graphtool_core::{Graph, Selectable};
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct GraphPropertiesView {
    pub directed: bool,
    pub weighted: bool,
    pub node_count: usize,
    pub edge_count: usize,
    pub degrees: Vec<(String, usize)>,
}

impl GraphPropertiesView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GraphView for GraphPropertiesView {
    fn refresh(&mut self, graph: &Graph) {
        self.directed = graph.is_directed();
        self.weighted = graph.is_weighted();
        self.node_count = graph.node_count();
        self.edge_count = graph.edge_count();
        self.degrees = graph
            .node_list()
            .iter()
            .map(|n| (n.name.clone(), graph.degree(&n.name)))
            .collect();
    }
}

/// Key/value rows for the selected node or edge. Holds the selection across
/// refreshes; a selection that no longer resolves (element deleted under it)
/// clears itself.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ElementPropertiesView {
    selection: Option<Selectable>,
    pub rows: Vec<(String, String)>,
}

impl ElementPropertiesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> Option<&Selectable> {
        self.selection.as_ref()
    }

    pub fn on_selected(&mut self, selection: Selectable, graph: &Graph) {
        self.selection = Some(selection);
        self.refresh(graph);
    }

    pub fn on_unselected(&mut self) {
        self.selection = None;
        self.rows.clear();
    }
}

impl GraphView for ElementPropertiesView {
    fn refresh(&mut self, graph: &Graph) {
        self.rows.clear();
        let Some(selection) = self.selection.clone() else {
            return;
        };
        match selection {
            Selectable::Node(name) => match graph.node(&name) {
                Some(node) => {
                    self.rows.push(("name".into(), node.name.clone()));
                    self.rows.push(("x".into(), node.position.x.to_string()));
                    self.rows.push(("y".into(), node.position.y.to_string()));
                    self.rows
                        .push(("degree".into(), graph.degree(&name).to_string()));
                }
                None => self.selection = None,
            },
            Selectable::Edge(u, v) => match graph.weight(&u, &v) {
                Some(weight) => {
                    self.rows.push(("from".into(), u.clone()));
                    self.rows.push(("to".into(), v.clone()));
                    self.rows.push(("weight".into(), weight.to_string()));
                }
                None => self.selection = None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphtool_core::Vec2;

    fn sample() -> Graph {
        let mut g = Graph::new(false, true);
        g.add_node("a", Vec2::new(1.0, 2.0)).unwrap();
        g.add_node("b", Vec2::default()).unwrap();
        g.set_edge("a", "b", 9).unwrap();
        g
    }

    #[test]
    fn test_graph_properties() {
        let g = sample();
        let mut view = GraphPropertiesView::new();
        view.refresh(&g);
        assert_eq!(view.node_count, 2);
        assert_eq!(view.edge_count, 1);
        assert!(view.weighted);
        assert_eq!(view.degrees, vec![("a".into(), 1), ("b".into(), 1)]);
    }

    #[test]
    fn test_element_properties_node() {
        let g = sample();
        let mut view = ElementPropertiesView::new();
        view.on_selected(Selectable::Node("a".into()), &g);
        assert!(view.rows.contains(&("name".into(), "a".into())));
        assert!(view.rows.contains(&("degree".into(), "1".into())));
    }

    #[test]
    fn test_element_properties_edge_reverse_orientation() {
        let g = sample();
        let mut view = ElementPropertiesView::new();
        view.on_selected(Selectable::Edge("b".into(), "a".into()), &g);
        assert!(view.rows.contains(&("weight".into(), "9".into())));
    }

    #[test]
    fn test_stale_selection_clears() {
        let mut g = sample();
        let mut view = ElementPropertiesView::new();
        view.on_selected(Selectable::Node("a".into()), &g);
        g.remove_node("a").unwrap();
        view.refresh(&g);
        assert!(view.selection().is_none());
        assert!(view.rows.is_empty());
    }
}
