//! Layout stack
//!
//! A layout is a one-axis container: it hands out the next free position
//! and grows by the footprint of whatever is pushed into it. Nested layouts
//! are folded into their parent as a single widget when they close.

use macroquad::math::Vec2;

/// Nesting limit; going deeper is a programmer error
pub const MAX_LAYOUT_DEPTH: usize = 256;

/// Gap between consecutive widgets unless configured otherwise
pub const DEFAULT_PADDING: Vec2 = Vec2::new(4.0, 4.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub orientation: Orientation,
    pub origin: Vec2,
    /// Combined footprint of everything pushed so far
    pub accumulated: Vec2,
    pub padding: Vec2,
}

impl Layout {
    pub fn new(origin: Vec2, orientation: Orientation, padding: Vec2) -> Self {
        Self {
            orientation,
            origin,
            accumulated: Vec2::ZERO,
            padding,
        }
    }

    /// Where the next widget goes
    pub fn available_pos(&self) -> Vec2 {
        match self.orientation {
            Orientation::Horizontal => Vec2::new(
                self.origin.x + self.accumulated.x + self.padding.x,
                self.origin.y,
            ),
            Orientation::Vertical => Vec2::new(
                self.origin.x,
                self.origin.y + self.accumulated.y + self.padding.y,
            ),
        }
    }

    /// Grow by a widget's footprint
    pub fn push_widget(&mut self, size: Vec2) {
        match self.orientation {
            Orientation::Horizontal => {
                self.accumulated.x += size.x + self.padding.x;
                self.accumulated.y = self.accumulated.y.max(size.y);
            }
            Orientation::Vertical => {
                self.accumulated.y += size.y + self.padding.y;
                self.accumulated.x = self.accumulated.x.max(size.x);
            }
        }
    }
}

/// Open layouts, innermost last
#[derive(Debug, Default)]
pub struct LayoutStack {
    layouts: Vec<Layout>,
}

impl LayoutStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn top(&self) -> Option<&Layout> {
        self.layouts.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Layout> {
        self.layouts.last_mut()
    }

    fn push(&mut self, layout: Layout) {
        assert!(
            self.layouts.len() < MAX_LAYOUT_DEPTH,
            "layouts nested deeper than {}",
            MAX_LAYOUT_DEPTH
        );
        self.layouts.push(layout);
    }

    /// Open a root layout at a caller-chosen origin
    pub fn begin(&mut self, origin: Vec2, orientation: Orientation, padding: Vec2) {
        self.push(Layout::new(origin, orientation, padding));
    }

    /// Open a child at the parent's next free position
    pub fn begin_layout(&mut self, orientation: Orientation, padding: Vec2) {
        let origin = match self.top() {
            Some(parent) => parent.available_pos(),
            None => panic!("begin_layout called with no open layout"),
        };
        self.push(Layout::new(origin, orientation, padding));
    }

    /// Close the innermost child and fold its footprint into the parent
    pub fn end_layout(&mut self) -> Layout {
        let child = match self.layouts.pop() {
            Some(child) => child,
            None => panic!("end_layout called with no open layout"),
        };
        match self.top_mut() {
            Some(parent) => parent.push_widget(child.accumulated),
            None => panic!("end_layout closed the root layout, use end() instead"),
        }
        child
    }

    /// Close the root layout; nothing to fold into
    pub fn end(&mut self) -> Layout {
        let root = match self.layouts.pop() {
            Some(root) => root,
            None => panic!("end called with no open layout"),
        };
        debug_assert!(
            self.layouts.is_empty(),
            "end called with {} nested layout(s) still open",
            self.layouts.len()
        );
        root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn test_vertical_layout_math() {
        let mut layout = Layout::new(Vec2::ZERO, Orientation::Vertical, Vec2::ZERO);
        let (s1, s2) = (v(30.0, 10.0), v(50.0, 20.0));

        assert_eq!(layout.available_pos(), v(0.0, 0.0));
        layout.push_widget(s1);
        assert_eq!(layout.available_pos(), v(0.0, s1.y));
        layout.push_widget(s2);
        assert_eq!(layout.accumulated, v(50.0, 30.0));
    }

    #[test]
    fn test_horizontal_layout_math() {
        let mut layout = Layout::new(Vec2::ZERO, Orientation::Horizontal, Vec2::ZERO);
        let (s1, s2) = (v(30.0, 10.0), v(50.0, 20.0));

        assert_eq!(layout.available_pos(), v(0.0, 0.0));
        layout.push_widget(s1);
        assert_eq!(layout.available_pos(), v(s1.x, 0.0));
        layout.push_widget(s2);
        assert_eq!(layout.accumulated, v(80.0, 20.0));
    }

    #[test]
    fn test_padding_gaps() {
        let mut layout = Layout::new(v(100.0, 50.0), Orientation::Vertical, DEFAULT_PADDING);
        assert_eq!(layout.available_pos(), v(100.0, 54.0));
        layout.push_widget(v(10.0, 10.0));
        assert_eq!(layout.accumulated, v(10.0, 14.0));
        assert_eq!(layout.available_pos(), v(100.0, 68.0));
    }

    #[test]
    fn test_nested_layout_folds_into_parent() {
        let mut stack = LayoutStack::new();
        stack.begin(v(10.0, 10.0), Orientation::Vertical, Vec2::ZERO);
        stack.top_mut().unwrap().push_widget(v(20.0, 5.0));

        stack.begin_layout(Orientation::Horizontal, Vec2::ZERO);
        assert_eq!(stack.top().unwrap().origin, v(10.0, 15.0));
        stack.top_mut().unwrap().push_widget(v(8.0, 4.0));
        stack.top_mut().unwrap().push_widget(v(8.0, 6.0));
        let child = stack.end_layout();
        assert_eq!(child.accumulated, v(16.0, 6.0));

        let root = stack.end();
        assert_eq!(root.accumulated, v(20.0, 11.0));
        assert!(stack.is_empty());
    }

    #[test]
    #[should_panic(expected = "no open layout")]
    fn test_begin_layout_without_root_panics() {
        LayoutStack::new().begin_layout(Orientation::Vertical, DEFAULT_PADDING);
    }

    #[test]
    #[should_panic(expected = "nested deeper")]
    fn test_depth_limit() {
        let mut stack = LayoutStack::new();
        stack.begin(Vec2::ZERO, Orientation::Vertical, DEFAULT_PADDING);
        for _ in 0..MAX_LAYOUT_DEPTH {
            stack.begin_layout(Orientation::Vertical, DEFAULT_PADDING);
        }
    }
}
