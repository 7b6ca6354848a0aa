pub mod canvas;
pub mod collab;
pub mod matrix;
pub mod playback;
pub mod properties;

pub use canvas::{CanvasScene, CanvasSink};
pub use collab::{ChoiceEntry, NumericEntry, TextEntry};
pub use matrix::{AdjacencyMatrixView, IncidenceMatrixView};
pub use playback::{DemoPlayback, TickOutcome};
pub use properties::{ElementPropertiesView, GraphPropertiesView};

use graphtool_core::Graph;

/// A view re-pulls its whole projection from the model on every change
/// notification. Refreshing twice from the same model state must produce the
/// same projection; no view talks to another view directly.
pub trait GraphView {
    fn refresh(&mut self, graph: &Graph);
}
