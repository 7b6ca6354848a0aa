//! The workspace coordinator: owns the graph model, the event bus, every
//! registered view, and the demo playback engine.
//!
//! All mutation requests flow through here. A successful logical operation
//! publishes exactly one `GraphChanged`, and the pump fans that notification
//! out to every view; views never talk to each other. Algorithm runs are
//! read-only against the model and hand their trace to the playback engine.

use anyhow::{Context, Result};
use graphtool_algo::{bfs, depth_limited_dfs, dfs, eulerian_circuits};
use graphtool_core::{Graph, GraphError, Selectable, Vec2};
use graphtool_events::{AlgorithmKind, Event, EventBus};
use graphtool_io::{read_graph, write_graph};
use graphtool_views::{
    AdjacencyMatrixView, CanvasScene, ChoiceEntry, DemoPlayback, ElementPropertiesView,
    GraphPropertiesView, GraphView, IncidenceMatrixView, NumericEntry, TextEntry, TickOutcome,
};
use std::path::{Path, PathBuf};

/// Dialog collaborators the workspace prompts through. The widgets behind
/// them are out of scope; tests script them.
pub struct Prompts {
    pub text: Box<dyn TextEntry>,
    pub numeric: Box<dyn NumericEntry>,
    pub choice: Box<dyn ChoiceEntry>,
}

pub struct Workspace {
    graph: Graph,
    bus: EventBus,
    prompts: Prompts,

    adjacency: AdjacencyMatrixView,
    incidence: IncidenceMatrixView,
    graph_props: GraphPropertiesView,
    element_props: ElementPropertiesView,
    scene: CanvasScene,
    playback: DemoPlayback,

    demo_token: u64,
    console: Vec<String>,
    dirty: bool,
    working_file: Option<PathBuf>,
}

impl Workspace {
    pub fn new(graph: Graph, prompts: Prompts) -> Self {
        let mut workspace = Self {
            graph,
            bus: EventBus::new(),
            prompts,
            adjacency: AdjacencyMatrixView::new(),
            incidence: IncidenceMatrixView::new(),
            graph_props: GraphPropertiesView::new(),
            element_props: ElementPropertiesView::new(),
            scene: CanvasScene::new(),
            playback: DemoPlayback::default(),
            demo_token: 0,
            console: Vec::new(),
            dirty: false,
            working_file: None,
        };
        workspace.refresh_views();
        workspace
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn adjacency(&self) -> &AdjacencyMatrixView {
        &self.adjacency
    }

    pub fn incidence(&self) -> &IncidenceMatrixView {
        &self.incidence
    }

    pub fn graph_properties(&self) -> &GraphPropertiesView {
        &self.graph_props
    }

    pub fn element_properties(&self) -> &ElementPropertiesView {
        &self.element_props
    }

    pub fn scene(&self) -> &CanvasScene {
        &self.scene
    }

    pub fn console(&self) -> &[String] {
        &self.console
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn working_file(&self) -> Option<&Path> {
        self.working_file.as_deref()
    }

    pub fn demo_running(&self) -> bool {
        self.playback.is_running()
    }

    pub fn demo_interval(&self) -> u32 {
        self.playback.interval()
    }

    /// One scheduled playback tick. `token` is the value `pump` stored when
    /// the demo started; a stale token is discarded.
    pub fn demo_tick(&mut self, token: u64) -> TickOutcome {
        self.playback.tick(token, &mut self.scene)
    }

    /// Drains every pending event, handling intents and fanning change
    /// notifications out to the views. Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        let rx = self.bus.receiver();
        let mut handled = 0;
        while let Ok(event) = rx.try_recv() {
            self.handle_event(&event);
            handled += 1;
        }
        handled
    }

    fn handle_event(&mut self, event: &Event) {
        match event {
            Event::GraphChanged => self.on_graph_changed(),

            Event::NodeAdded {
                position,
                auto_named,
            } => self.add_node_flow(*position, *auto_named),
            Event::NodeRemoved { name } => {
                self.apply(|graph| graph.remove_node(name));
            }
            Event::NodeIsolated { name } => {
                self.apply(|graph| graph.isolate_node(name));
            }
            Event::NodeRenamed { name } => self.rename_flow(name),
            Event::NodeMoved { name, position } => {
                self.apply(|graph| graph.set_node_position(name, *position));
            }
            Event::EdgeRequested { u, v } => self.set_edge_flow(u, v),
            Event::EdgeRemoved { u, v } => {
                self.apply(|graph| graph.remove_edge(u, v));
            }
            Event::AlgorithmRequested { kind, source } => {
                self.run_algorithm(*kind, source.as_deref())
            }

            Event::NodeSelected { name } => {
                self.playback.cancel(&mut self.scene);
                self.scene.set_selection(Selectable::Node(name.clone()));
                self.element_props
                    .on_selected(Selectable::Node(name.clone()), &self.graph);
            }
            Event::EdgeSelected { u, v } => {
                self.playback.cancel(&mut self.scene);
                self.scene
                    .set_selection(Selectable::Edge(u.clone(), v.clone()));
                self.element_props
                    .on_selected(Selectable::Edge(u.clone(), v.clone()), &self.graph);
            }
            Event::SelectionCleared => {
                self.playback.cancel(&mut self.scene);
                self.scene.clear_selection();
                self.element_props.on_unselected();
            }

            Event::ShowError { message } => {
                tracing::warn!("{message}");
                self.console.push(format!("error: {message}"));
            }
            Event::StatusUpdate { message } => self.console.push(message.clone()),
        }
    }

    /// Runs one mutation against the model. Success publishes exactly one
    /// `GraphChanged`; rejection publishes the error message and nothing
    /// else.
    fn apply<F>(&mut self, op: F) -> bool
    where
        F: FnOnce(&mut Graph) -> Result<(), GraphError>,
    {
        match op(&mut self.graph) {
            Ok(()) => {
                self.bus.publish(Event::GraphChanged);
                true
            }
            Err(err) => {
                self.bus.publish(Event::ShowError {
                    message: err.to_string(),
                });
                false
            }
        }
    }

    fn on_graph_changed(&mut self) {
        self.dirty = true;
        // a running demo's trace no longer matches the model
        self.playback.cancel(&mut self.scene);
        self.console.clear();
        self.refresh_views();
    }

    fn refresh_views(&mut self) {
        self.adjacency.refresh(&self.graph);
        self.incidence.refresh(&self.graph);
        self.graph_props.refresh(&self.graph);
        self.element_props.refresh(&self.graph);
    }

    fn add_node_flow(&mut self, position: Vec2, auto_named: bool) {
        let name = if auto_named {
            self.graph.next_node_name()
        } else {
            let suggestion = self.graph.next_node_name();
            match self.prompts.text.get_text("Node name", &suggestion) {
                Some(name) => name,
                None => return,
            }
        };
        self.apply(|graph| graph.add_node(&name, position));
    }

    fn rename_flow(&mut self, name: &str) {
        let suggestion = self.graph.next_node_name();
        let Some(new_name) = self.prompts.text.get_text("New node name", &suggestion) else {
            return;
        };
        self.apply(|graph| graph.set_node_name(name, &new_name));
    }

    fn set_edge_flow(&mut self, u: &str, v: &str) {
        let weight = if self.graph.is_weighted() {
            let default = self.graph.weight(u, v).unwrap_or(1) as i64;
            match self
                .prompts
                .numeric
                .get_int(&format!("Weight for edge ({u}, {v})"), 1, u32::MAX as i64, default)
            {
                Some(w) => w as u32,
                None => return,
            }
        } else {
            1
        };
        self.apply(|graph| graph.set_edge(u, v, weight));
    }

    fn run_algorithm(&mut self, kind: AlgorithmKind, source: Option<&str>) {
        let source = match kind {
            AlgorithmKind::EulerianCircuits => None,
            _ => match source {
                Some(name) => Some(name.to_string()),
                None => {
                    let options: Vec<String> = self
                        .graph
                        .node_list()
                        .iter()
                        .map(|n| n.name.clone())
                        .collect();
                    match self.prompts.choice.get_item("Source node", &options) {
                        Some(name) => Some(name),
                        None => return,
                    }
                }
            },
        };

        let result = match kind {
            AlgorithmKind::Bfs => bfs(&self.graph, source.as_deref().unwrap_or_default()),
            AlgorithmKind::Dfs => dfs(&self.graph, source.as_deref().unwrap_or_default()),
            AlgorithmKind::EulerianCircuits => eulerian_circuits(&self.graph),
        };
        match result {
            Ok(trace) => {
                let steps = trace.len();
                self.demo_token = self.playback.start(trace, &mut self.scene);
                self.console
                    .push(format!("demo started: {kind:?}, {steps} steps"));
            }
            Err(err) => self.bus.publish(Event::ShowError {
                message: err.to_string(),
            }),
        }
    }

    /// Most recent demo playback token; ticks scheduled by the host pass it
    /// back through [`Workspace::demo_tick`].
    pub fn demo_token(&self) -> u64 {
        self.demo_token
    }

    /// Depth-limited reachability report (prompted source + radius).
    pub fn reachability_flow(&mut self) {
        let options: Vec<String> = self
            .graph
            .node_list()
            .iter()
            .map(|n| n.name.clone())
            .collect();
        let Some(source) = self.prompts.choice.get_item("Source node", &options) else {
            return;
        };
        let Some(depth) = self.prompts.numeric.get_int("Max depth", 0, i64::MAX, 1) else {
            return;
        };
        match depth_limited_dfs(&self.graph, &source, depth as usize) {
            Ok(names) => self.console.push(format!(
                "reachable from {source} within {depth}: {}",
                names.join(" ")
            )),
            Err(err) => self.bus.publish(Event::ShowError {
                message: err.to_string(),
            }),
        }
    }

    // ------------------------------------------------------------------
    // File flows
    // ------------------------------------------------------------------

    /// Replaces the current graph with a fresh one. Dirty until saved.
    pub fn new_graph(&mut self, path: PathBuf, directed: bool, weighted: bool, nodes: usize) {
        self.graph = Graph::with_nodes(nodes, directed, weighted);
        self.working_file = Some(path);
        self.dirty = true;
        self.reset_transient();
        self.refresh_views();
    }

    /// Loads a `.gph` file. On any failure the current graph is untouched
    /// and the error is returned for the caller to surface.
    pub fn open(&mut self, path: PathBuf) -> Result<()> {
        let graph =
            read_graph(&path).with_context(|| format!("failed to open graph {:?}", path))?;
        self.graph = graph;
        self.working_file = Some(path);
        self.dirty = false;
        self.reset_transient();
        self.refresh_views();
        Ok(())
    }

    pub fn save(&mut self) -> Result<()> {
        let path = self
            .working_file
            .clone()
            .context("no working file; use save_as")?;
        write_graph(&path, &self.graph)
            .with_context(|| format!("failed to save graph {:?}", path))?;
        self.dirty = false;
        Ok(())
    }

    pub fn save_as(&mut self, path: PathBuf) -> Result<()> {
        self.working_file = Some(path);
        self.save()
    }

    fn reset_transient(&mut self) {
        self.playback.cancel(&mut self.scene);
        self.scene.clear_selection();
        self.scene.clear_highlights();
        self.element_props.on_unselected();
        self.console.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use tempfile::tempdir;

    struct Scripted {
        answers: VecDeque<Option<String>>,
    }

    impl Scripted {
        fn new(answers: &[Option<&str>]) -> Box<Self> {
            Box::new(Self {
                answers: answers
                    .iter()
                    .map(|a| a.map(|s| s.to_string()))
                    .collect(),
            })
        }
    }

    impl TextEntry for Scripted {
        fn get_text(&mut self, _prompt: &str, _default: &str) -> Option<String> {
            self.answers.pop_front().flatten()
        }
    }

    impl ChoiceEntry for Scripted {
        fn get_item(&mut self, _label: &str, _options: &[String]) -> Option<String> {
            self.answers.pop_front().flatten()
        }
    }

    struct ScriptedInt {
        answers: VecDeque<Option<i64>>,
    }

    impl ScriptedInt {
        fn new(answers: &[Option<i64>]) -> Box<Self> {
            Box::new(Self {
                answers: answers.iter().copied().collect(),
            })
        }
    }

    impl NumericEntry for ScriptedInt {
        fn get_int(&mut self, _prompt: &str, _min: i64, _max: i64, default: i64) -> Option<i64> {
            self.answers.pop_front().unwrap_or(Some(default))
        }
    }

    fn prompts() -> Prompts {
        Prompts {
            text: Scripted::new(&[]),
            numeric: ScriptedInt::new(&[]),
            choice: Scripted::new(&[]),
        }
    }

    fn seeded(directed: bool, weighted: bool) -> Workspace {
        let mut graph = Graph::new(directed, weighted);
        graph.add_node("a", Vec2::new(0.0, 0.0)).unwrap();
        graph.add_node("b", Vec2::new(10.0, 0.0)).unwrap();
        graph.set_edge("a", "b", 1).unwrap();
        Workspace::new(graph, prompts())
    }

    #[test]
    fn test_auto_named_node_intent() {
        let mut ws = seeded(false, false);
        ws.bus().publish(Event::NodeAdded {
            position: Vec2::new(5.0, 5.0),
            auto_named: true,
        });
        ws.pump();
        assert!(ws.graph().has_node("c"));
        assert!(ws.is_dirty());
        // the adjacency projection picked up the new node
        assert_eq!(ws.adjacency().headers, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_prompted_node_duplicate_is_rejected() {
        let mut ws = seeded(false, false);
        ws.prompts.text = Scripted::new(&[Some("a")]);
        ws.bus().publish(Event::NodeAdded {
            position: Vec2::default(),
            auto_named: false,
        });
        ws.pump();
        assert_eq!(ws.graph().node_count(), 2);
        assert!(!ws.is_dirty());
        assert!(ws.console().iter().any(|l| l.starts_with("error:")));
    }

    #[test]
    fn test_dismissed_prompt_does_nothing() {
        let mut ws = seeded(false, false);
        ws.prompts.text = Scripted::new(&[None]);
        ws.bus().publish(Event::NodeAdded {
            position: Vec2::default(),
            auto_named: false,
        });
        ws.pump();
        assert_eq!(ws.graph().node_count(), 2);
        assert!(ws.console().is_empty());
    }

    #[test]
    fn test_edge_request_prompts_weight() {
        let mut ws = seeded(false, true);
        ws.prompts.numeric = ScriptedInt::new(&[Some(7)]);
        ws.bus().publish(Event::EdgeRequested {
            u: "a".into(),
            v: "b".into(),
        });
        ws.pump();
        assert_eq!(ws.graph().weight("a", "b"), Some(7));
        assert_eq!(ws.adjacency().cell(0, 1), Some(7));
    }

    #[test]
    fn test_rename_intent_rewrites_views() {
        let mut ws = seeded(false, false);
        ws.prompts.text = Scripted::new(&[Some("Z")]);
        ws.bus().publish(Event::NodeRenamed { name: "a".into() });
        ws.pump();
        assert!(ws.graph().has_edge("Z", "b"));
        assert_eq!(ws.adjacency().headers, vec!["Z", "b"]);
    }

    #[test]
    fn test_selection_drives_element_properties() {
        let mut ws = seeded(false, true);
        ws.bus().publish(Event::EdgeSelected {
            u: "a".into(),
            v: "b".into(),
        });
        ws.pump();
        assert!(ws
            .element_properties()
            .rows
            .contains(&("weight".into(), "1".into())));

        ws.bus().publish(Event::SelectionCleared);
        ws.pump();
        assert!(ws.element_properties().rows.is_empty());
        assert!(ws.scene().selection().is_none());
    }

    #[test]
    fn test_algorithm_demo_lifecycle() {
        let mut ws = seeded(false, false);
        ws.bus().publish(Event::AlgorithmRequested {
            kind: AlgorithmKind::Bfs,
            source: Some("a".into()),
        });
        ws.pump();
        assert!(ws.demo_running());

        let token = ws.demo_token();
        assert_eq!(ws.demo_tick(token), TickOutcome::Advanced);
        assert!(ws.scene().is_node_highlighted("a"));

        // a mutation mid-demo cancels playback and clears highlights
        ws.bus().publish(Event::NodeAdded {
            position: Vec2::default(),
            auto_named: true,
        });
        ws.pump();
        assert!(!ws.demo_running());
        assert!(!ws.scene().has_highlights());
        assert_eq!(ws.demo_tick(token), TickOutcome::Stale);
    }

    #[test]
    fn test_unknown_source_is_a_message_not_a_crash() {
        let mut ws = seeded(false, false);
        ws.bus().publish(Event::AlgorithmRequested {
            kind: AlgorithmKind::Dfs,
            source: Some("zz".into()),
        });
        ws.pump();
        assert!(!ws.demo_running());
        assert!(ws.console().iter().any(|l| l.contains("zz")));
    }

    #[test]
    fn test_euler_precondition_failure_reports() {
        // path graph: two odd-degree vertices
        let mut ws = seeded(false, false);
        ws.bus().publish(Event::AlgorithmRequested {
            kind: AlgorithmKind::EulerianCircuits,
            source: None,
        });
        ws.pump();
        assert!(!ws.demo_running());
        assert!(ws.console().iter().any(|l| l.starts_with("error:")));
    }

    #[test]
    fn test_reachability_flow() {
        let mut ws = seeded(false, false);
        ws.prompts.choice = Scripted::new(&[Some("a")]);
        ws.prompts.numeric = ScriptedInt::new(&[Some(0)]);
        ws.reachability_flow();
        assert!(ws.console().iter().any(|l| l.ends_with(": a")));
    }

    #[test]
    fn test_save_and_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("demo.gph");
        let mut ws = seeded(true, true);
        assert!(ws.save().is_err());
        ws.save_as(path.clone()).unwrap();
        assert!(!ws.is_dirty());

        let mut other = Workspace::new(Graph::new(false, false), prompts());
        other.open(path).unwrap();
        assert_eq!(other.graph(), ws.graph());
        assert!(!other.is_dirty());
    }

    #[test]
    fn test_failed_open_keeps_current_graph() {
        let dir = tempdir().unwrap();
        let mut ws = seeded(false, false);
        let before = ws.graph().clone();
        assert!(ws.open(dir.path().join("missing.gph")).is_err());
        assert_eq!(ws.graph(), &before);
    }

    #[test]
    fn test_new_graph_prepopulates_and_marks_dirty() {
        let dir = tempdir().unwrap();
        let mut ws = seeded(false, false);
        ws.new_graph(dir.path().join("fresh.gph"), false, true, 3);
        assert_eq!(ws.graph().node_count(), 3);
        assert_eq!(ws.graph().edge_count(), 0);
        assert!(ws.is_dirty());
        assert_eq!(ws.graph_properties().node_count, 3);
    }
}
