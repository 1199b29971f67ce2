//! Obstacle generation
//!
//! Spawning is driven by the session clock rather than a second timer, so
//! the schedule is reproducible tick for tick.

use rand::Rng;

use super::state::{GameState, Obstacle};

/// Whether the spawn interval has elapsed.
///
/// With an empty pool the first obstacle waits half an interval after the
/// start; afterwards each obstacle waits a full interval after the newest one.
pub fn obstacle_due(state: &GameState) -> bool {
    let interval = state.tuning.obstacle_interval_ms;
    match state.obstacles.last() {
        None => state.elapsed_ms > interval / 2.0,
        Some(newest) => state.elapsed_ms - newest.created_at_ms >= interval,
    }
}

/// Integer width in `[player_width / 2, field_width / 2)`
fn roll_width(state: &mut GameState) -> u32 {
    let min = (state.player.size.x / 2.0).floor().max(1.0) as u32;
    let max = (state.field.width / 2.0).floor() as u32;
    if max > min {
        state.rng.random_range(min..max)
    } else {
        min
    }
}

/// Append one randomly sized obstacle at the top of the field
pub fn spawn_obstacle(state: &mut GameState) -> u32 {
    let width = roll_width(state);
    let span = (state.field.width - width as f32).floor();
    let x = if span >= 1.0 {
        state.rng.random_range(0..span as u32)
    } else {
        0
    };

    let id = state.next_entity_id();
    let obstacle = Obstacle::new(
        id,
        x as f32,
        width as f32,
        state.tuning.obstacle_height,
        state.elapsed_ms,
    );
    log::debug!("Spawned obstacle {} at x={} width={}", id, x, width);
    state.obstacles.push(obstacle);
    id
}
