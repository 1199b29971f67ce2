//! A canvas that remembers what was drawn instead of drawing it

use glam::Vec2;

use super::{Canvas, Sprite, TextStyle};
use crate::Rect;

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Image {
        sprite: Sprite,
        rect: Rect,
    },
    FillRect {
        rect: Rect,
        color: String,
    },
    Text {
        text: String,
        pos: Vec2,
        style: TextStyle,
    },
}

/// Headless [`Canvas`]: everything since the last `clear` is one frame
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub commands: Vec<DrawCommand>,
    /// Number of `clear` calls seen
    pub frames: u64,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filled rectangles with their colors, in draw order
    pub fn filled_rects(&self) -> impl Iterator<Item = (Rect, &str)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((*rect, color.as_str())),
            _ => None,
        })
    }

    /// Text lines, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }
}

impl Canvas for RecordingCanvas {
    fn clear(&mut self) {
        self.commands.clear();
        self.frames += 1;
        self.commands.push(DrawCommand::Clear);
    }

    fn draw_image(&mut self, sprite: Sprite, rect: Rect) {
        self.commands.push(DrawCommand::Image { sprite, rect });
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: color.to_string(),
        });
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            style,
        });
    }
}
