//! UI context: layouts, pointer snapshot and widget identity
//!
//! Widgets are identified by call order: the counter restarts at `begin` and
//! every widget call takes the next number. The active id is the only state
//! that survives between frames, so callers must keep their widget calls in
//! the same order from frame to frame for a press-and-release to land on the
//! same widget.

use super::layout::{Layout, LayoutStack, Orientation, DEFAULT_PADDING};
use super::painter::Painter;
use super::theme::DEFAULT_CHAR_SIZE;
use super::MouseState;
use macroquad::math::Vec2;

pub struct Ui<P> {
    pub(super) painter: P,
    pub(super) layouts: LayoutStack,
    pub(super) mouse: MouseState,
    pub(super) char_size: u16,
    padding: Vec2,
    current_id: u32,
    pub(super) active_id: Option<u32>,
}

impl<P: Painter> Ui<P> {
    pub fn new(painter: P) -> Self {
        Self {
            painter,
            layouts: LayoutStack::new(),
            mouse: MouseState::default(),
            char_size: DEFAULT_CHAR_SIZE,
            padding: DEFAULT_PADDING,
            current_id: 0,
            active_id: None,
        }
    }

    /// Gap between widgets for layouts opened from now on
    pub fn with_padding(mut self, padding: Vec2) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_char_size(mut self, char_size: u16) -> Self {
        self.char_size = char_size;
        self
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    pub fn painter_mut(&mut self) -> &mut P {
        &mut self.painter
    }

    pub fn mouse(&self) -> &MouseState {
        &self.mouse
    }

    /// Widget currently holding the pointer
    pub fn active_id(&self) -> Option<u32> {
        self.active_id
    }

    /// Take this frame's pointer snapshot (call before any `begin`)
    pub fn begin_frame(&mut self, mouse: MouseState) {
        self.mouse = mouse;
    }

    /// Start a UI pass with a root layout at `origin`
    pub fn begin(&mut self, origin: Vec2, orientation: Orientation) {
        self.current_id = 0;
        self.layouts.begin(origin, orientation, self.padding);
    }

    pub fn begin_layout(&mut self, orientation: Orientation) {
        self.layouts.begin_layout(orientation, self.padding);
    }

    pub fn end_layout(&mut self) {
        self.layouts.end_layout();
    }

    /// Close the root layout, returning it with its final footprint
    pub fn end(&mut self) -> Layout {
        self.layouts.end()
    }

    pub(super) fn next_id(&mut self) -> u32 {
        let id = self.current_id;
        self.current_id += 1;
        id
    }

    /// Innermost open layout; widgets outside any layout are a bug
    pub(super) fn top_layout(&mut self) -> &mut Layout {
        match self.layouts.top_mut() {
            Some(layout) => layout,
            None => panic!("widget called with no open layout"),
        }
    }
}
