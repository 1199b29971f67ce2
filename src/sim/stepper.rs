//! Fixed-step accumulator driving [`tick`] from variable frame times

use super::state::GameState;
use super::tick::{GameEvent, TickInput, tick};
use crate::consts::{MAX_FRAME_MS, MAX_SUBSTEPS};
use crate::input::Direction;

/// Turns animation-frame deltas into whole simulation ticks
#[derive(Debug, Clone, Default)]
pub struct FrameStepper {
    accumulator: f64,
    /// Input gathered since the last tick
    pending: TickInput,
}

impl FrameStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a start command for the next tick
    pub fn request_start(&mut self) {
        self.pending.start = true;
    }

    /// Queue a key press for the next tick
    pub fn queue_move(&mut self, direction: Direction) {
        self.pending.moves.push(direction);
    }

    /// Run as many ticks as `dt_ms` covers and return their events.
    ///
    /// The delta is capped at `MAX_FRAME_MS` and at most `MAX_SUBSTEPS` ticks
    /// run per frame. Queued input goes to the first tick only; stepping stops
    /// at game over.
    pub fn advance(&mut self, state: &mut GameState, dt_ms: f64) -> Vec<GameEvent> {
        self.accumulator += dt_ms.clamp(0.0, MAX_FRAME_MS);
        let step = state.tuning.tick_ms;

        let mut events = Vec::new();
        let mut substeps = 0;
        while self.accumulator >= step && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.pending);
            events.extend(tick(state, &input));
            self.accumulator -= step;
            substeps += 1;

            if state.is_over() {
                break;
            }
        }
        events
    }
}
