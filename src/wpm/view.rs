//! Practice text and stats panel

use super::session::{CharStatus, TypingSession};
use macroquad::prelude::*;
use moge::ui::{theme, Align, Orientation, Painter, Ui};

/// Extra space between glyph cells and between lines
const CHAR_SPACING: f32 = 2.0;

/// Where the practice text starts
pub const TEXT_ORIGIN: Vec2 = Vec2::new(20.0, 20.0);

/// Font size bounds for the size slider
pub const MIN_CHAR_SIZE: f32 = 12.0;
pub const MAX_CHAR_SIZE: f32 = 72.0;

/// Top-left corner of each glyph cell; newlines take no cell
pub fn glyph_positions(text: &[char], origin: Vec2, char_size: f32) -> Vec<Option<Vec2>> {
    let advance = char_size / 2.0 + CHAR_SPACING;
    let line_height = char_size + CHAR_SPACING;
    let mut column = 0;
    let mut y = origin.y;
    text.iter()
        .map(|&ch| {
            if ch == '\n' {
                y += line_height;
                column = 0;
                return None;
            }
            let pos = Vec2::new(origin.x + column as f32 * advance, y);
            column += 1;
            Some(pos)
        })
        .collect()
}

fn status_color(status: CharStatus) -> Color {
    match status {
        CharStatus::Pending => Color::new(1.0, 1.0, 1.0, 100.0 / 255.0),
        CharStatus::Correct => theme::TEXT_COLOR,
        CharStatus::Wrong => RED,
    }
}

/// Draw the practice text, coloured by what has been typed
pub fn draw_text<P: Painter>(painter: &mut P, session: &TypingSession, char_size: f32) {
    let size = char_size as u16;
    let mut glyph = [0u8; 4];
    for (i, pos) in glyph_positions(session.text(), TEXT_ORIGIN, char_size)
        .into_iter()
        .enumerate()
    {
        let Some(pos) = pos else { continue };
        let status = session.status(i);
        // A mistyped space would be invisible
        let ch = match (status, session.text()[i]) {
            (CharStatus::Wrong, ' ') => '_',
            (_, ch) => ch,
        };
        painter.text(ch.encode_utf8(&mut glyph), pos, size, status_color(status));
    }
}

/// Settings the panel edits in place
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelState {
    pub show_keyboard: bool,
    pub char_size: f32,
}

/// Stats and controls docked against `anchor` (the panel's top-right
/// corner). Returns true when Restart was clicked.
pub fn draw_panel<P: Painter>(
    ui: &mut Ui<P>,
    anchor: Vec2,
    session: &TypingSession,
    state: &mut PanelState,
) -> bool {
    ui.begin(anchor, Orientation::Vertical);
    ui.label(&format!("time: {:.2}s", session.elapsed()), Align::TopRight);
    ui.label(&format!("ch/s: {:.2}", session.chars_per_sec()), Align::TopRight);
    ui.label(&format!("wpm: {:.1}", session.wpm()), Align::TopRight);
    if session.is_done() {
        ui.label_colored("done!", Align::TopRight, GREEN);
    }
    let restart = ui.button("Restart", Align::TopRight);
    ui.toggle_button(&mut state.show_keyboard, "Keyboard", Align::TopRight);
    state.char_size = ui.slider(
        state.char_size,
        MIN_CHAR_SIZE,
        MAX_CHAR_SIZE,
        "size",
        100.0,
        Align::TopRight,
    );
    ui.end();
    restart
}
