//! UI Theme - Shared colors and sizes for the widget engine

use macroquad::prelude::Color;
use macroquad::math::Vec2;

// =============================================================================
// Colors
// =============================================================================

/// Base widget color; highlights reuse it with a lowered alpha
pub const WIDGET_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Primary text color
pub const TEXT_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Dimmed/secondary text
pub const TEXT_DIM: Color = Color::new(0.4, 0.4, 0.45, 1.0);

/// Background behind typed text and panels
pub const BG_COLOR: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Highlight alpha added while a widget holds the pointer
pub const ACTIVE_ALPHA: f32 = 100.0 / 255.0;

/// Highlight alpha added while the pointer hovers a widget
pub const HOVER_ALPHA: f32 = 50.0 / 255.0;

/// Slider knob alpha when not hovered
pub const KNOB_IDLE_ALPHA: f32 = 100.0 / 255.0;

// =============================================================================
// Sizes
// =============================================================================

/// Widget text size unless the Ui is configured otherwise
pub const DEFAULT_CHAR_SIZE: u16 = 20;

/// Space around button text; labels and sliders are inset by half of it
pub const WIDGET_PADDING: Vec2 = Vec2::new(10.0, 10.0);

/// Gap between a slider's caption and its track
pub const SLIDER_GAP: f32 = 10.0;

/// Outline thickness for buttons
pub const OUTLINE_THICKNESS: f32 = 1.0;

/// Highlight color for a widget in the given state
pub fn highlight(base: Color, active: bool, hovered: bool) -> Color {
    let mut alpha = 0.0;
    if active {
        alpha += ACTIVE_ALPHA;
    }
    if hovered {
        alpha += HOVER_ALPHA;
    }
    Color::new(base.r, base.g, base.b, alpha)
}
