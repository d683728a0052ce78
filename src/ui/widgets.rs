//! Basic UI widgets
//!
//! Every widget follows the same per-frame steps: take the next id, size
//! itself, place itself against the layout's anchor, hit-test the pointer,
//! update the press state, draw, and report its footprint to the layout.

use super::math::remap;
use super::painter::Painter;
use super::theme::{
    highlight, KNOB_IDLE_ALPHA, OUTLINE_THICKNESS, SLIDER_GAP, TEXT_COLOR, WIDGET_COLOR,
    WIDGET_PADDING,
};
use super::{Align, Rect, Ui};
use macroquad::prelude::{Color, Vec2};

/// Clamp into the range spanned by `a` and `b`, whichever is larger
fn clamp_between(value: f32, a: f32, b: f32) -> f32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    value.max(lo).min(hi)
}

impl<P: Painter> Ui<P> {
    /// Press on hover, fire on release. Returns true on the release frame
    /// when the pointer is still over the widget.
    fn track_press(&mut self, id: u32, hovered: bool) -> bool {
        if self.active_id != Some(id) && hovered && self.mouse.left_pressed {
            self.active_id = Some(id);
        }
        if self.active_id == Some(id) && self.mouse.left_released {
            self.active_id = None;
            return hovered;
        }
        false
    }

    /// Button geometry: text plus padding, anchored by `align`
    fn button_rect(&mut self, text: &str, align: Align) -> Rect {
        let anchor = self.top_layout().available_pos();
        let size = self.painter.measure_text(text, self.char_size) + WIDGET_PADDING;
        Rect::from_pos_size(align.place(anchor, size), size)
    }

    fn draw_button(&mut self, rect: Rect, text: &str, lit: bool, hovered: bool) {
        self.painter.fill_rect(rect, highlight(WIDGET_COLOR, lit, hovered));
        self.painter.outline_rect(rect, OUTLINE_THICKNESS, WIDGET_COLOR);
        self.painter.text(
            text,
            rect.pos() + WIDGET_PADDING / 2.0,
            self.char_size,
            TEXT_COLOR,
        );
    }

    /// Push button, returns true on the frame it is clicked
    pub fn button(&mut self, text: &str, align: Align) -> bool {
        let id = self.next_id();
        let rect = self.button_rect(text, align);
        let hovered = self.mouse.inside(&rect);

        let clicked = self.track_press(id, hovered);
        let active = self.active_id == Some(id);
        self.draw_button(rect, text, active, hovered);

        let pushed = align.pushed(rect.size() + WIDGET_PADDING);
        self.top_layout().push_widget(pushed);
        clicked
    }

    /// Button bound to a caller-owned flag. The flag flips on release over
    /// the button; returns true on the frame it flipped.
    pub fn toggle_button(&mut self, state: &mut bool, text: &str, align: Align) -> bool {
        let id = self.next_id();
        let rect = self.button_rect(text, align);
        let hovered = self.mouse.inside(&rect);

        let flipped = self.track_press(id, hovered);
        if flipped {
            *state = !*state;
        }
        self.draw_button(rect, text, *state, hovered);

        let pushed = align.pushed(rect.size() + WIDGET_PADDING);
        self.top_layout().push_widget(pushed);
        flipped
    }

    /// Captioned horizontal slider.
    ///
    /// While held, the pointer's x offset along the track picks the value.
    /// The result is always within `[min, max]`.
    pub fn slider(
        &mut self,
        value: f32,
        min: f32,
        max: f32,
        text: &str,
        track_width: f32,
        align: Align,
    ) -> f32 {
        let id = self.next_id();
        let anchor = self.top_layout().available_pos() + WIDGET_PADDING / 2.0;
        let text_size = self.painter.measure_text(text, self.char_size);
        let size = Vec2::new(text_size.x + SLIDER_GAP + track_width, text_size.y);
        let pos = align.place(anchor, size);
        let track = Rect::new(pos.x + text_size.x + SLIDER_GAP, pos.y, track_width, size.y);
        let hovered = self.mouse.inside(&track);

        if self.active_id != Some(id) && hovered && self.mouse.left_pressed {
            self.active_id = Some(id);
        }
        let mut value = value;
        if self.active_id == Some(id) {
            if self.mouse.left_down || self.mouse.left_pressed {
                value = remap(self.mouse.x - track.x, 0.0, track_width, min, max);
            }
            if self.mouse.left_released {
                self.active_id = None;
            }
        }
        let value = clamp_between(value, min, max);

        let mid_y = track.y + size.y / 2.0;
        self.painter.text(text, pos, self.char_size, TEXT_COLOR);
        self.painter.line(
            Vec2::new(track.x, mid_y),
            Vec2::new(track.right(), mid_y),
            OUTLINE_THICKNESS,
            WIDGET_COLOR,
        );
        let knob_alpha = if hovered || self.active_id == Some(id) {
            1.0
        } else {
            KNOB_IDLE_ALPHA
        };
        let knob_x = track.x + remap(value, min, max, 0.0, track_width);
        self.painter.fill_circle(
            Vec2::new(knob_x, mid_y),
            size.y / 4.0,
            Color::new(WIDGET_COLOR.r, WIDGET_COLOR.g, WIDGET_COLOR.b, knob_alpha),
        );

        self.top_layout().push_widget(align.pushed(size));
        value
    }

    /// Static text
    pub fn label(&mut self, text: &str, align: Align) {
        self.label_colored(text, align, TEXT_COLOR);
    }

    pub fn label_colored(&mut self, text: &str, align: Align, color: Color) {
        self.next_id();
        let anchor = self.top_layout().available_pos() + WIDGET_PADDING / 2.0;
        let size = self.painter.measure_text(text, self.char_size);
        let pos = align.place(anchor, size);
        self.painter.text(text, pos, self.char_size, color);
        self.top_layout().push_widget(align.pushed(size));
    }

    /// Reserve empty space, returns the rectangle it occupies
    pub fn spacer(&mut self, size: Vec2, align: Align) -> Rect {
        self.next_id();
        let anchor = self.top_layout().available_pos();
        let rect = Rect::from_pos_size(align.place(anchor, size), size);
        self.top_layout().push_widget(align.pushed(size));
        rect
    }
}
