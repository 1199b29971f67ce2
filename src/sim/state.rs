//! Game state and core simulation types
//!
//! The whole session lives in [`GameState`]; the tick and the renderer borrow it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::CollisionBox;
use crate::Rect;
use crate::consts::SPRITE_SCALE;
use crate::input::Direction;
use crate::tuning::Tuning;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Scene is drawn, waiting for the start button
    NotStarted,
    /// Obstacles fall and the player steers
    Running,
    /// Player hit an obstacle; terminal until reload
    GameOver,
}

/// Canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// The player's car
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the sprite
    pub pos: Vec2,
    pub size: Vec2,
    pub score: u64,
}

impl Player {
    /// Place the car horizontally centred, `bottom_margin` above the bottom edge
    pub fn new(field: Field, size: Vec2, bottom_margin: f32) -> Self {
        let mut player = Self {
            pos: Vec2::new(
                field.width / 2.0 - size.x / 2.0,
                field.height - size.y - bottom_margin,
            ),
            size,
            score: 0,
        };
        player.pos.x = player.pos.x.clamp(0.0, player.max_x(field.width));
        player
    }

    /// Drawn size for a sprite of the given natural size, or the tuning fallback
    pub fn size_from_sprite(natural: Option<(u32, u32)>, tuning: &Tuning) -> Vec2 {
        match natural {
            Some((w, h)) if w > 0 && h > 0 => Vec2::new(w as f32, h as f32) * SPRITE_SCALE,
            _ => Vec2::new(tuning.fallback_player_width, tuning.fallback_player_height),
        }
    }

    /// Rightmost x that keeps the sprite on the canvas
    #[inline]
    pub fn max_x(&self, field_width: f32) -> f32 {
        (field_width - self.size.x).max(0.0)
    }

    /// Step one `speed` in `direction`, clamped to the canvas
    pub fn steer(&mut self, direction: Direction, speed: f32, field_width: f32) {
        let x = self.pos.x + speed * direction.sign();
        self.pos.x = x.clamp(0.0, self.max_x(field_width));
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Top edge and horizontal span
    pub fn collision_box(&self) -> CollisionBox {
        let rect = self.rect();
        CollisionBox {
            y: rect.pos.y,
            x_min: rect.pos.x,
            x_max: rect.right(),
        }
    }
}

/// A falling rectangle
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Session clock value when spawned (ms)
    pub created_at_ms: f64,
}

impl Obstacle {
    pub fn new(id: u32, x: f32, width: f32, height: f32, created_at_ms: f64) -> Self {
        Self {
            id,
            pos: Vec2::new(x, 0.0),
            size: Vec2::new(width, height),
            created_at_ms,
        }
    }

    /// Fall by `speed` pixels
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.pos.y += speed;
    }

    #[inline]
    pub fn is_off_screen(&self, field_height: f32) -> bool {
        self.pos.y >= field_height
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }

    /// Bottom edge and horizontal span
    pub fn collision_box(&self) -> CollisionBox {
        let rect = self.rect();
        CollisionBox {
            y: rect.bottom(),
            x_min: rect.pos.x,
            x_max: rect.right(),
        }
    }
}

/// Complete session state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub tuning: Tuning,
    pub field: Field,
    pub phase: GamePhase,
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Simulated milliseconds since the start
    pub elapsed_ms: f64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a session that has not started yet
    pub fn new(seed: u64, field: Field, player_size: Vec2, tuning: Tuning) -> Self {
        let player = Player::new(field, player_size, tuning.player_bottom_margin);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
            field,
            phase: GamePhase::NotStarted,
            player,
            obstacles: Vec::new(),
            elapsed_ms: 0.0,
            time_ticks: 0,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn score(&self) -> u64 {
        self.player.score
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field() -> Field {
        Field::new(800.0, 600.0)
    }

    #[test]
    fn test_player_starts_centred_above_bottom() {
        let player = Player::new(field(), Vec2::new(100.0, 60.0), 20.0);
        assert_eq!(player.pos, Vec2::new(350.0, 520.0));
        assert_eq!(player.score, 0);
    }

    #[test]
    fn test_size_from_sprite_halves_natural_size() {
        let tuning = Tuning::default();
        assert_eq!(
            Player::size_from_sprite(Some((200, 120)), &tuning),
            Vec2::new(100.0, 60.0)
        );
        assert_eq!(
            Player::size_from_sprite(None, &tuning),
            Vec2::new(tuning.fallback_player_width, tuning.fallback_player_height)
        );
        // An image that has not loaded reports 0x0
        assert_eq!(
            Player::size_from_sprite(Some((0, 0)), &tuning),
            Vec2::new(tuning.fallback_player_width, tuning.fallback_player_height)
        );
    }

    #[test]
    fn test_steer_stops_at_edges() {
        let mut player = Player::new(field(), Vec2::new(100.0, 60.0), 20.0);
        player.pos.x = 5.0;
        player.steer(Direction::Left, 10.0, 800.0);
        assert_eq!(player.pos.x, 0.0);

        player.pos.x = 695.0;
        player.steer(Direction::Right, 10.0, 800.0);
        assert_eq!(player.pos.x, 700.0);

        player.steer(Direction::Left, 10.0, 800.0);
        assert_eq!(player.pos.x, 690.0);
    }

    #[test]
    fn test_oversized_player_pinned_to_left_edge() {
        let player = Player::new(Field::new(80.0, 600.0), Vec2::new(100.0, 60.0), 20.0);
        assert_eq!(player.pos.x, 0.0);
    }

    #[test]
    fn test_obstacle_off_screen_boundary() {
        let mut obstacle = Obstacle::new(1, 10.0, 50.0, 20.0, 0.0);
        obstacle.pos.y = 599.0;
        assert!(!obstacle.is_off_screen(600.0));
        obstacle.advance(1.0);
        assert!(obstacle.is_off_screen(600.0));
    }

    #[test]
    fn test_collision_boxes_use_relevant_edges() {
        let player = Player::new(field(), Vec2::new(100.0, 60.0), 20.0);
        let pb = player.collision_box();
        assert_eq!((pb.y, pb.x_min, pb.x_max), (520.0, 350.0, 450.0));

        let mut obstacle = Obstacle::new(1, 300.0, 200.0, 20.0, 0.0);
        obstacle.pos.y = 40.0;
        let ob = obstacle.collision_box();
        assert_eq!((ob.y, ob.x_min, ob.x_max), (60.0, 300.0, 500.0));
    }

    proptest! {
        #[test]
        fn prop_player_stays_on_canvas(
            width in 1.0f32..400.0,
            speed in 0.5f32..50.0,
            moves in proptest::collection::vec(any::<bool>(), 0..300),
        ) {
            let field = Field::new(800.0, 600.0);
            let mut player = Player::new(field, Vec2::new(width, 40.0), 20.0);
            for right in moves {
                let dir = if right { Direction::Right } else { Direction::Left };
                player.steer(dir, speed, field.width);
                prop_assert!(player.pos.x >= 0.0);
                prop_assert!(player.pos.x <= field.width - width);
            }
        }
    }
}
