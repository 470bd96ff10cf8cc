use serde::{Serialize, Deserialize};
use super::Vec2;

/// Axis-aligned rectangle, origin at the top-left corner (canvas coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.x
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.y
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.origin + self.size.scale(0.5)
    }

    /// Footprint area, used for painter's-order sorting
    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    /// True when the rectangle has positive, finite extent on both axes
    pub fn is_drawable(&self) -> bool {
        self.origin.is_finite() && self.size.is_finite() && self.size.x > 0.0 && self.size.y > 0.0
    }

    /// Shrink by `amount` on every side. The size never goes negative.
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            origin: self.origin + Vec2::splat(amount),
            size: Vec2::new(
                (self.size.x - amount * 2.0).max(0.0),
                (self.size.y - amount * 2.0).max(0.0),
            ),
        }
    }

    pub fn translate(&self, offset: Vec2) -> Self {
        Self {
            origin: self.origin + offset,
            size: self.size,
        }
    }

    /// Scale the size around a pivot expressed as a fraction of the rectangle
    /// (`(0.5, 1.0)` keeps the bottom center fixed).
    pub fn scale_about(&self, scale: f32, pivot: Vec2) -> Self {
        let anchor = self.origin + self.size.mul_elem(&pivot);
        let size = self.size.scale(scale);
        Self {
            origin: anchor - size.mul_elem(&pivot),
            size,
        }
    }

    /// Does `other` lie inside this rectangle, allowing `epsilon` slack
    pub fn contains_rect(&self, other: &Rect, epsilon: f32) -> bool {
        other.min_x() >= self.min_x() - epsilon
            && other.min_y() >= self.min_y() - epsilon
            && other.max_x() <= self.max_x() + epsilon
            && other.max_y() <= self.max_y() + epsilon
    }

    /// Smallest rectangle covering both
    pub fn union(&self, other: &Rect) -> Rect {
        let min_x = self.min_x().min(other.min_x());
        let min_y = self.min_y().min(other.min_y());
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::from_xywh(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.max_x(), 40.0);
        assert_eq!(r.max_y(), 60.0);
        assert_eq!(r.area(), 1200.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_rect_inset_clamps() {
        let r = Rect::from_xywh(0.0, 0.0, 10.0, 4.0).inset(3.0);
        assert_eq!(r.origin, Vec2::new(3.0, 3.0));
        assert_eq!(r.size, Vec2::new(4.0, 0.0));
    }

    #[test]
    fn test_scale_about_bottom_center() {
        let r = Rect::from_xywh(0.0, 0.0, 10.0, 20.0).scale_about(0.5, Vec2::new(0.5, 1.0));
        assert_eq!(r.size, Vec2::new(5.0, 10.0));
        assert_eq!(r.max_y(), 20.0);
        assert_eq!(r.center().x, 5.0);
    }

    #[test]
    fn test_contains_and_union() {
        let outer = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
        let inner = Rect::from_xywh(2.0, 2.0, 3.0, 3.0);
        assert!(outer.contains_rect(&inner, 0.0));
        assert!(!inner.contains_rect(&outer, 0.0));

        let u = inner.union(&Rect::from_xywh(8.0, 8.0, 4.0, 4.0));
        assert_eq!(u, Rect::from_xywh(2.0, 2.0, 10.0, 10.0));
    }

    #[test]
    fn test_degenerate_is_not_drawable() {
        assert!(!Rect::from_xywh(0.0, 0.0, 0.0, 5.0).is_drawable());
        assert!(!Rect::from_xywh(0.0, 0.0, f32::NAN, 5.0).is_drawable());
        assert!(Rect::from_xywh(0.0, 0.0, 1.0, 5.0).is_drawable());
    }
}
