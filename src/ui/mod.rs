//! Immediate-mode UI
//!
//! Nothing is retained between frames except which widget holds the pointer.
//! Each frame: `begin_frame` with a fresh `MouseState`, then `begin` a root
//! layout, call widgets (optionally inside nested layouts), and `end`.
//!
//! Drawing and text measurement go through the `Painter` trait, so all of the
//! layout and hit-testing logic runs headless in tests.

mod align;
mod context;
mod input;
pub mod layout;
pub mod math;
mod painter;
mod rect;
pub mod theme;
mod widgets;

pub use align::Align;
pub use context::Ui;
pub use input::MouseState;
pub use layout::{Layout, LayoutStack, Orientation, MAX_LAYOUT_DEPTH};
pub use painter::{MacroquadPainter, Painter};
pub use rect::Rect;
