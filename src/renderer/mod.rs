//! Scene rendering
//!
//! The scene is described through the [`Canvas`] trait so the same drawing
//! code targets the browser's 2D context or a recording used by tests and
//! the headless binary.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod recording;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2d;
pub use recording::{DrawCommand, RecordingCanvas};
pub use scene::{draw_game_over, draw_scene, render};

use glam::Vec2;

use crate::Rect;

/// Image assets known to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sprite {
    Background,
    Player,
}

/// Font and fill for a line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size_px: f32,
    pub color: &'static str,
    /// Centre the text on its position instead of starting there
    pub centered: bool,
}

/// A 2D drawing surface
pub trait Canvas {
    /// Erase the whole surface
    fn clear(&mut self);
    /// Draw a sprite stretched into `rect`; skipped while the image is not loaded
    fn draw_image(&mut self, sprite: Sprite, rect: Rect);
    /// Fill `rect` with a CSS color
    fn fill_rect(&mut self, rect: Rect, color: &str);
    /// Draw one line of text with its baseline at `pos`
    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle);
}
