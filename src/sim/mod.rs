//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (obstacles in spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawner;
pub mod state;
pub mod stepper;
pub mod tick;

pub use collision::{CollisionBox, boxes_collide, first_collision, has_collided};
pub use spawner::{obstacle_due, spawn_obstacle};
pub use state::{Field, GamePhase, GameState, Obstacle, Player};
pub use stepper::FrameStepper;
pub use tick::{GameEvent, TickInput, tick};
