//! Screen-space rectangles

use crate::point::Point2f;

/// An axis-aligned rectangle in window pixels, origin at the top-left
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Whether `point` lies inside; the right and bottom edges are excluded
    pub fn contains(&self, point: Point2f) -> bool {
        point.x >= self.x
            && point.x < self.x + self.width
            && point.y >= self.y
            && point.y < self.y + self.height
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - 2.0 * amount).max(0.0),
            height: (self.height - 2.0 * amount).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_half_open() {
        let rect = ScreenRect::new(740.0, 540.0, 50.0, 50.0);
        assert!(rect.contains(Point2f::new(740.0, 540.0)));
        assert!(rect.contains(Point2f::new(789.0, 589.0)));
        assert!(!rect.contains(Point2f::new(790.0, 560.0)));
        assert!(!rect.contains(Point2f::new(760.0, 590.0)));
        assert!(!rect.contains(Point2f::new(739.9, 560.0)));
    }

    #[test]
    fn test_inset() {
        let rect = ScreenRect::new(10.0, 20.0, 50.0, 50.0).inset(2.0);
        assert_eq!(rect, ScreenRect::new(12.0, 22.0, 46.0, 46.0));
        assert_eq!(ScreenRect::new(0.0, 0.0, 3.0, 3.0).inset(2.0).width, 0.0);
    }
}
