//! Nine-way widget alignment
//!
//! The layout hands out an anchor point; alignment decides which point of the
//! widget sits on it. Each axis is shifted back by none, half, or all of the
//! widget's extent, and the footprint reported to the layout shrinks by the
//! same fraction. A right-aligned widget therefore docks against the anchor
//! without growing the layout in x.

use macroquad::math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    CenterCenter,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Align {
    /// Fraction of the extent the anchor moves back by, per axis
    pub fn shift(self) -> Vec2 {
        let (x, y) = match self {
            Align::TopLeft => (0.0, 0.0),
            Align::TopCenter => (0.5, 0.0),
            Align::TopRight => (1.0, 0.0),
            Align::CenterLeft => (0.0, 0.5),
            Align::CenterCenter => (0.5, 0.5),
            Align::CenterRight => (1.0, 0.5),
            Align::BottomLeft => (0.0, 1.0),
            Align::BottomCenter => (0.5, 1.0),
            Align::BottomRight => (1.0, 1.0),
        };
        Vec2::new(x, y)
    }

    /// Top-left corner of a widget of `size` anchored at `anchor`
    pub fn place(self, anchor: Vec2, size: Vec2) -> Vec2 {
        anchor - size * self.shift()
    }

    /// Portion of `footprint` the widget reports to its layout
    pub fn pushed(self, footprint: Vec2) -> Vec2 {
        footprint * (Vec2::ONE - self.shift())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_right_docks() {
        let size = Vec2::new(40.0, 12.0);
        let anchor = Vec2::new(200.0, 10.0);
        assert_eq!(Align::TopRight.place(anchor, size), Vec2::new(160.0, 10.0));
        assert_eq!(Align::TopRight.pushed(size), Vec2::new(0.0, 12.0));
    }

    #[test]
    fn test_center_halves() {
        let size = Vec2::new(40.0, 12.0);
        assert_eq!(Align::CenterCenter.place(Vec2::ZERO, size), Vec2::new(-20.0, -6.0));
        assert_eq!(Align::CenterCenter.pushed(size), Vec2::new(20.0, 6.0));
        assert_eq!(Align::TopLeft.pushed(size), size);
        assert_eq!(Align::BottomRight.pushed(size), Vec2::ZERO);
    }
}
