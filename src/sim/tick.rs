//! Fixed timestep simulation tick
//!
//! One tick runs the ordered sub-steps of the game loop: start handling,
//! spawn, steer, fall, off-screen filtering with scoring, collision.

use super::collision::{CollisionBox, first_collision};
use super::spawner::{obstacle_due, spawn_obstacle};
use super::state::{GamePhase, GameState};
use crate::input::Direction;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start button was clicked
    pub start: bool,
    /// Arrow key presses in arrival order
    pub moves: Vec<Direction>,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started,
    ObstacleSpawned {
        id: u32,
    },
    ObstacleCleared {
        id: u32,
        points: u64,
    },
    PlayerMoved {
        x: f32,
    },
    Collided {
        obstacle_id: u32,
        player: CollisionBox,
        obstacle: CollisionBox,
    },
    GameOver {
        score: u64,
    },
}

/// Advance the game state by one fixed timestep of `tuning.tick_ms`
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Start is idempotent: only NotStarted reacts to it
    let starting = input.start && state.phase == GamePhase::NotStarted;
    if starting {
        state.phase = GamePhase::Running;
        log::info!("Game started (seed {})", state.seed);
        events.push(GameEvent::Started);
    }

    if state.phase != GamePhase::Running {
        return events;
    }

    state.time_ticks += 1;
    state.elapsed_ms += state.tuning.tick_ms;

    if obstacle_due(state) {
        let id = spawn_obstacle(state);
        events.push(GameEvent::ObstacleSpawned { id });
    }

    // Presses queued alongside the start arrived before it
    let moves: &[Direction] = if starting { &[] } else { &input.moves };
    for &direction in moves {
        state
            .player
            .steer(direction, state.tuning.player_speed, state.field.width);
        events.push(GameEvent::PlayerMoved {
            x: state.player.pos.x,
        });
    }

    let fall = state.tuning.obstacle_speed;
    for obstacle in &mut state.obstacles {
        obstacle.advance(fall);
    }

    // Obstacles that left the screen were dodged
    let height = state.field.height;
    let points = state.tuning.points_per_obstacle;
    let mut cleared = 0u64;
    state.obstacles.retain(|obstacle| {
        if obstacle.is_off_screen(height) {
            cleared += 1;
            events.push(GameEvent::ObstacleCleared {
                id: obstacle.id,
                points,
            });
            false
        } else {
            true
        }
    });
    state.player.score += cleared * points;

    if let Some(index) = first_collision(&state.player, &state.obstacles) {
        let obstacle = &state.obstacles[index];
        let player_box = state.player.collision_box();
        let obstacle_box = obstacle.collision_box();
        log::info!(
            "Collision: player x {}..{} top {}, obstacle {} x {}..{} bottom {}",
            player_box.x_min,
            player_box.x_max,
            player_box.y,
            obstacle.id,
            obstacle_box.x_min,
            obstacle_box.x_max,
            obstacle_box.y
        );
        events.push(GameEvent::Collided {
            obstacle_id: obstacle.id,
            player: player_box,
            obstacle: obstacle_box,
        });

        state.phase = GamePhase::GameOver;
        log::info!("Game over with score {}", state.player.score);
        events.push(GameEvent::GameOver {
            score: state.player.score,
        });
    }

    events
}
