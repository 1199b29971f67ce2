//! What a frame looks like

use glam::Vec2;

use super::{Canvas, Sprite, TextStyle};
use crate::Rect;
use crate::consts::{GAME_OVER_BAND_HEIGHT, GAME_OVER_BAND_Y};
use crate::sim::{GamePhase, GameState};

pub const OBSTACLE_COLOR: &str = "red";
pub const BAND_COLOR: &str = "black";

const HUD_TEXT: TextStyle = TextStyle {
    size_px: 20.0,
    color: "white",
    centered: false,
};
const TITLE_TEXT: TextStyle = TextStyle {
    size_px: 48.0,
    color: "white",
    centered: true,
};
const SUBTITLE_TEXT: TextStyle = TextStyle {
    size_px: 28.0,
    color: "white",
    centered: true,
};

/// Draw the current frame for any phase
pub fn render(state: &GameState, canvas: &mut impl Canvas) {
    draw_scene(state, canvas);
    if state.phase == GamePhase::GameOver {
        draw_game_over(state, canvas);
    }
}

/// Background, car, obstacles and the score
pub fn draw_scene(state: &GameState, canvas: &mut impl Canvas) {
    let field = state.field;
    canvas.clear();
    canvas.draw_image(
        Sprite::Background,
        Rect::new(0.0, 0.0, field.width, field.height),
    );
    canvas.draw_image(Sprite::Player, state.player.rect());

    for obstacle in &state.obstacles {
        canvas.fill_rect(obstacle.rect(), OBSTACLE_COLOR);
    }

    canvas.fill_text(
        &format!("Score: {}", state.score()),
        Vec2::new(10.0, 10.0 + HUD_TEXT.size_px),
        HUD_TEXT,
    );
}

/// Black band across the canvas with the final score
pub fn draw_game_over(state: &GameState, canvas: &mut impl Canvas) {
    let width = state.field.width;
    canvas.fill_rect(
        Rect::new(0.0, GAME_OVER_BAND_Y, width, GAME_OVER_BAND_HEIGHT),
        BAND_COLOR,
    );

    let center_x = width / 2.0;
    canvas.fill_text(
        "GAME OVER",
        Vec2::new(center_x, GAME_OVER_BAND_Y + GAME_OVER_BAND_HEIGHT * 0.45),
        TITLE_TEXT,
    );
    canvas.fill_text(
        &format!("Score: {}", state.score()),
        Vec2::new(center_x, GAME_OVER_BAND_Y + GAME_OVER_BAND_HEIGHT * 0.75),
        SUBTITLE_TEXT,
    );
}
