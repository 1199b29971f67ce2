//! Browser canvas backend using the 2D rendering context

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Canvas, Sprite, TextStyle};
use crate::Rect;

pub struct Canvas2d {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    background: HtmlImageElement,
    player: HtmlImageElement,
}

impl Canvas2d {
    /// Wrap the canvas' 2D context; `None` if the browser refuses one
    pub fn new(
        canvas: &HtmlCanvasElement,
        background: HtmlImageElement,
        player: HtmlImageElement,
    ) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            background,
            player,
        })
    }

    fn image(&self, sprite: Sprite) -> &HtmlImageElement {
        match sprite {
            Sprite::Background => &self.background,
            Sprite::Player => &self.player,
        }
    }
}

impl Canvas for Canvas2d {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_image(&mut self, sprite: Sprite, rect: Rect) {
        let img = self.image(sprite);
        // Not loaded (or failed to load): draw nothing
        if !img.complete() || img.natural_width() == 0 {
            return;
        }
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(
            rect.pos.x as f64,
            rect.pos.y as f64,
            rect.size.x as f64,
            rect.size.y as f64,
        );
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.ctx.set_font(&format!("bold {}px sans-serif", style.size_px));
        self.ctx
            .set_text_align(if style.centered { "center" } else { "left" });
        self.ctx.set_fill_style_str(style.color);
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
