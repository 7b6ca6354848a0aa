//! Timed, cancellable replay of an algorithm trace against the canvas's
//! transient highlight state.
//!
//! The engine owns no timer. The host schedules a recurring tick at
//! `interval()` time-units on the single control thread and passes back the
//! generation token it got from `start`; a tick whose token no longer
//! matches was scheduled before a cancel or restart and is discarded.

use crate::canvas::CanvasScene;
use graphtool_algo::AlgorithmTrace;

pub const DEFAULT_INTERVAL: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running { next_step: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// A step was revealed, more remain; keep ticking.
    Advanced,
    /// The final step was revealed; playback is Idle, highlight left visible.
    Finished,
    /// The tick belonged to a cancelled or superseded run; nothing applied.
    Stale,
}

#[derive(Debug)]
pub struct DemoPlayback {
    interval: u32,
    state: State,
    generation: u64,
    trace: AlgorithmTrace,
}

impl Default for DemoPlayback {
    fn default() -> Self {
        Self::new(DEFAULT_INTERVAL)
    }
}

impl DemoPlayback {
    pub fn new(interval: u32) -> Self {
        Self {
            interval,
            state: State::Idle,
            generation: 0,
            trace: AlgorithmTrace::default(),
        }
    }

    pub fn interval(&self) -> u32 {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running { .. })
    }

    /// Begins playback, implicitly cancelling any run already in progress
    /// (its highlights are fully cleared first). Two traces never
    /// interleave. Returns the generation token ticks must present.
    pub fn start(&mut self, trace: AlgorithmTrace, scene: &mut CanvasScene) -> u64 {
        if self.is_running() {
            self.cancel(scene);
        }
        scene.clear_highlights();
        self.trace = trace;
        self.generation += 1;
        self.state = if self.trace.is_empty() {
            State::Idle
        } else {
            State::Running { next_step: 0 }
        };
        self.generation
    }

    /// Running -> Idle, clearing all highlight state. From Idle this is a
    /// no-op.
    pub fn cancel(&mut self, scene: &mut CanvasScene) {
        if self.is_running() {
            self.state = State::Idle;
            self.generation += 1;
            scene.clear_highlights();
        }
    }

    /// Advances one step. Must be called with the token returned by the
    /// `start` that scheduled this tick.
    pub fn tick(&mut self, generation: u64, scene: &mut CanvasScene) -> TickOutcome {
        let State::Running { next_step } = self.state else {
            return TickOutcome::Stale;
        };
        if generation != self.generation {
            return TickOutcome::Stale;
        }

        scene.highlight_step(&self.trace.steps()[next_step]);
        if next_step + 1 == self.trace.len() {
            // final group stays visible until the next interaction
            self.state = State::Idle;
            TickOutcome::Finished
        } else {
            self.state = State::Running {
                next_step: next_step + 1,
            };
            TickOutcome::Advanced
        }
    }
}
