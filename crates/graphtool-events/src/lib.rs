use crossbeam_channel::{unbounded, Receiver, Sender};
use graphtool_core::Vec2;
use serde::{Deserialize, Serialize};

/// Which algorithm a view asked to demonstrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgorithmKind {
    Bfs,
    Dfs,
    EulerianCircuits,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// The graph was mutated; every view re-pulls its projection. Carries no
    /// payload on purpose: consumers converge from the model itself.
    GraphChanged,

    // Canvas intents
    NodeAdded {
        position: Vec2,
        auto_named: bool,
    },
    NodeRemoved {
        name: String,
    },
    NodeIsolated {
        name: String,
    },
    NodeRenamed {
        name: String,
    },
    NodeMoved {
        name: String,
        position: Vec2,
    },
    EdgeRequested {
        u: String,
        v: String,
    },
    EdgeRemoved {
        u: String,
        v: String,
    },
    AlgorithmRequested {
        kind: AlgorithmKind,
        source: Option<String>,
    },

    // Selection
    NodeSelected {
        name: String,
    },
    EdgeSelected {
        u: String,
        v: String,
    },
    SelectionCleared,

    // User messages
    ShowError {
        message: String,
    },
    StatusUpdate {
        message: String,
    },
}

/// Single shared channel every mutator publishes into. The workspace drains
/// it once per frame and fans change notifications out to its views; a full
/// drain between publishes keeps "one logical mutation, one notification".
#[derive(Clone)]
pub struct EventBus {
    tx: Sender<Event>,
    rx: Receiver<Event>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    pub fn sender(&self) -> Sender<Event> {
        self.tx.clone()
    }

    pub fn receiver(&self) -> Receiver<Event> {
        self.rx.clone()
    }

    pub fn publish(&self, event: Event) {
        let _ = self.tx.send(event);
    }

    /// Dispatch all pending events to a listener. Returns how many events
    /// were handled so hosts can decide whether a repaint is needed.
    pub fn dispatch_to<L: EventListener>(&self, listener: &mut L) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            listener.handle_event(&event);
            handled += 1;
        }
        handled
    }
}

/// Trait for components that respond to events.
pub trait EventListener {
    fn handle_event(&mut self, event: &Event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_receive() {
        let bus = EventBus::new();
        bus.publish(Event::NodeAdded {
            position: Vec2::new(1.0, 2.0),
            auto_named: true,
        });

        match bus.receiver().recv().unwrap() {
            Event::NodeAdded {
                position,
                auto_named,
            } => {
                assert_eq!(position, Vec2::new(1.0, 2.0));
                assert!(auto_named);
            }
            other => panic!("expected NodeAdded, got {other:?}"),
        }
    }

    #[test]
    fn test_dispatch_drains_in_order() {
        struct Recorder(Vec<Event>);
        impl EventListener for Recorder {
            fn handle_event(&mut self, event: &Event) {
                self.0.push(event.clone());
            }
        }

        let bus = EventBus::new();
        bus.publish(Event::GraphChanged);
        bus.publish(Event::SelectionCleared);
        bus.publish(Event::GraphChanged);

        let mut recorder = Recorder(Vec::new());
        assert_eq!(bus.dispatch_to(&mut recorder), 3);
        assert_eq!(
            recorder.0,
            vec![Event::GraphChanged, Event::SelectionCleared, Event::GraphChanged]
        );
        // nothing left pending
        assert_eq!(bus.dispatch_to(&mut recorder), 0);
    }
}
