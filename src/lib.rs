//! Road Dodge - steer a car down the road and dodge the falling obstacles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, obstacles, collisions, game state)
//! - `input`: Key mapping and movement commands
//! - `renderer`: Canvas drawing (browser 2D context or a recording canvas)
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use input::Direction;
pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Engine constants that are not part of gameplay tuning
pub mod consts {
    /// Maximum simulation steps per animation frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 64;
    /// Longest frame delta fed to the accumulator (ms), e.g. after a tab switch
    pub const MAX_FRAME_MS: f64 = 100.0;

    /// Canvas size used by the headless build
    pub const HEADLESS_CANVAS_WIDTH: f32 = 800.0;
    pub const HEADLESS_CANVAS_HEIGHT: f32 = 600.0;

    /// Sprite sources, relative to the page
    pub const BACKGROUND_SRC: &str = "./images/road.png";
    pub const PLAYER_SRC: &str = "./images/car.png";
    /// Sprites are drawn at half their natural size
    pub const SPRITE_SCALE: f32 = 0.5;

    /// Game over band (drawn across the full canvas width)
    pub const GAME_OVER_BAND_Y: f32 = 100.0;
    pub const GAME_OVER_BAND_HEIGHT: f32 = 200.0;
}

/// Axis-aligned rectangle in canvas pixels (top-left origin, y grows down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }
}
