//! Drawing seam between the widget engine and the renderer
//!
//! Widgets only ever talk to a `Painter`, so layout and hit-testing can run
//! without a window.

use super::Rect;
use macroquad::prelude::*;

pub trait Painter {
    /// Rendered extent of `text` at `size`
    fn measure_text(&self, text: &str, size: u16) -> Vec2;
    fn fill_rect(&mut self, rect: Rect, color: Color);
    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color);
    /// Draw `text` with its top-left corner at `pos`
    fn text(&mut self, text: &str, pos: Vec2, size: u16, color: Color);
}

/// Draws straight into macroquad's current frame
#[derive(Default)]
pub struct MacroquadPainter {
    pub font: Option<Font>,
}

impl MacroquadPainter {
    pub fn new(font: Option<Font>) -> Self {
        Self { font }
    }
}

impl Painter for MacroquadPainter {
    fn measure_text(&self, text: &str, size: u16) -> Vec2 {
        let dims = measure_text(text, self.font.as_ref(), size, 1.0);
        Vec2::new(dims.width, dims.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, color);
    }

    fn outline_rect(&mut self, rect: Rect, thickness: f32, color: Color) {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, thickness, color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        draw_circle(center.x, center.y, radius, color);
    }

    fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Color) {
        draw_line(from.x, from.y, to.x, to.y, thickness, color);
    }

    fn text(&mut self, text: &str, pos: Vec2, size: u16, color: Color) {
        // macroquad positions text by its baseline
        let dims = measure_text(text, self.font.as_ref(), size, 1.0);
        draw_text_ex(
            text,
            pos.x.round(),
            (pos.y + dims.offset_y).round(),
            TextParams {
                font: self.font.as_ref(),
                font_size: size,
                color,
                ..Default::default()
            },
        );
    }
}
