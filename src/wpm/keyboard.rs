//! On-screen keyboard overlay
//!
//! A 60% ANSI layout; held keys light up.

use macroquad::prelude::*;
use moge::ui::{theme, Rect};

/// Width of a regular key in pixels
pub const KEY_SIZE: f32 = 48.0;
/// Gap carved out of every key's cell
const KEY_PAD: f32 = KEY_SIZE * 0.05;

struct Key {
    code: KeyCode,
    label: &'static str,
    /// Width in key units
    units: f32,
}

const fn key(code: KeyCode, label: &'static str) -> Key {
    Key { code, label, units: 1.0 }
}

const fn wide(code: KeyCode, label: &'static str, units: f32) -> Key {
    Key { code, label, units }
}

/// Every row is 15 units wide
const ROWS: [&[Key]; 5] = [
    &[
        key(KeyCode::GraveAccent, "`"),
        key(KeyCode::Key1, "1"),
        key(KeyCode::Key2, "2"),
        key(KeyCode::Key3, "3"),
        key(KeyCode::Key4, "4"),
        key(KeyCode::Key5, "5"),
        key(KeyCode::Key6, "6"),
        key(KeyCode::Key7, "7"),
        key(KeyCode::Key8, "8"),
        key(KeyCode::Key9, "9"),
        key(KeyCode::Key0, "0"),
        key(KeyCode::Minus, "-"),
        key(KeyCode::Equal, "="),
        wide(KeyCode::Backspace, "bksp", 2.0),
    ],
    &[
        wide(KeyCode::Tab, "tab", 1.5),
        key(KeyCode::Q, "Q"),
        key(KeyCode::W, "W"),
        key(KeyCode::E, "E"),
        key(KeyCode::R, "R"),
        key(KeyCode::T, "T"),
        key(KeyCode::Y, "Y"),
        key(KeyCode::U, "U"),
        key(KeyCode::I, "I"),
        key(KeyCode::O, "O"),
        key(KeyCode::P, "P"),
        key(KeyCode::LeftBracket, "["),
        key(KeyCode::RightBracket, "]"),
        wide(KeyCode::Backslash, "\\", 1.5),
    ],
    &[
        wide(KeyCode::CapsLock, "caps", 1.75),
        key(KeyCode::A, "A"),
        key(KeyCode::S, "S"),
        key(KeyCode::D, "D"),
        key(KeyCode::F, "F"),
        key(KeyCode::G, "G"),
        key(KeyCode::H, "H"),
        key(KeyCode::J, "J"),
        key(KeyCode::K, "K"),
        key(KeyCode::L, "L"),
        key(KeyCode::Semicolon, ";"),
        key(KeyCode::Apostrophe, "'"),
        wide(KeyCode::Enter, "enter", 2.25),
    ],
    &[
        wide(KeyCode::LeftShift, "shift", 2.05),
        key(KeyCode::Z, "Z"),
        key(KeyCode::X, "X"),
        key(KeyCode::C, "C"),
        key(KeyCode::V, "V"),
        key(KeyCode::B, "B"),
        key(KeyCode::N, "N"),
        key(KeyCode::M, "M"),
        key(KeyCode::Comma, ","),
        key(KeyCode::Period, "."),
        key(KeyCode::Slash, "/"),
        wide(KeyCode::RightShift, "shift", 2.95),
    ],
    &[
        wide(KeyCode::LeftControl, "ctrl", 1.25),
        wide(KeyCode::LeftSuper, "super", 1.25),
        wide(KeyCode::LeftAlt, "alt", 1.25),
        wide(KeyCode::Space, "", 6.25),
        wide(KeyCode::RightAlt, "alt", 1.25),
        wide(KeyCode::RightSuper, "super", 1.25),
        wide(KeyCode::Menu, "menu", 1.25),
        wide(KeyCode::RightControl, "ctrl", 1.25),
    ],
];

/// Screen rectangles of every key, in row order
pub fn key_rects(origin: Vec2) -> Vec<(KeyCode, &'static str, Rect)> {
    let mut rects = Vec::new();
    for (row, keys) in ROWS.iter().enumerate() {
        let mut x = origin.x;
        let y = origin.y + row as f32 * KEY_SIZE;
        for key in keys.iter() {
            let w = key.units * KEY_SIZE;
            let cell = Rect::new(x, y, w, KEY_SIZE);
            rects.push((key.code, key.label, cell));
            x += w;
        }
    }
    rects
}

/// Total footprint of the overlay
pub fn size() -> Vec2 {
    Vec2::new(15.0 * KEY_SIZE, ROWS.len() as f32 * KEY_SIZE)
}

/// Draw the overlay with its top-left corner at `origin`
pub fn draw(origin: Vec2, font: Option<&Font>) {
    let label_size = (KEY_SIZE / 3.0) as u16;
    for (code, label, cell) in key_rects(origin) {
        let r = Rect::new(
            cell.x + KEY_PAD,
            cell.y + KEY_PAD,
            cell.w - KEY_PAD * 2.0,
            cell.h - KEY_PAD * 2.0,
        );
        if is_key_down(code) {
            draw_rectangle(r.x, r.y, r.w, r.h, Color::new(1.0, 1.0, 1.0, 100.0 / 255.0));
        }
        draw_rectangle_lines(r.x, r.y, r.w, r.h, 1.0, theme::TEXT_DIM);
        if !label.is_empty() {
            draw_text_ex(
                label,
                (r.x + 4.0).round(),
                (r.y + label_size as f32).round(),
                TextParams {
                    font,
                    font_size: label_size,
                    color: theme::TEXT_DIM,
                    ..Default::default()
                },
            );
        }
    }
}
