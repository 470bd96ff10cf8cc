use std::ops::{Add, Sub, Mul, Neg};
use serde::{Serialize, Deserialize};

/// 2D vector used for points, sizes, and offsets on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Same value on both axes
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn scale(&self, s: f32) -> Self {
        Self {
            x: self.x * s,
            y: self.y * s,
        }
    }

    /// Component-wise product (size scaled per axis)
    pub fn mul_elem(&self, other: &Self) -> Self {
        Self {
            x: self.x * other.x,
            y: self.y * other.y,
        }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

/// Sample the circular arc that starts at `from`, passes through `through`
/// and ends at `to`. Collinear input degrades to the straight polyline.
pub fn arc_through(from: Vec2, through: Vec2, to: Vec2, segments: usize) -> Vec<Vec2> {
    let segments = segments.max(2);

    // Circumcircle of the three points
    let d = 2.0 * (from.x * (through.y - to.y) + through.x * (to.y - from.y) + to.x * (from.y - through.y));
    if d.abs() < 1e-6 {
        return vec![from, through, to];
    }

    let sq = |p: Vec2| p.x * p.x + p.y * p.y;
    let center = Vec2::new(
        (sq(from) * (through.y - to.y) + sq(through) * (to.y - from.y) + sq(to) * (from.y - through.y)) / d,
        (sq(from) * (to.x - through.x) + sq(through) * (from.x - to.x) + sq(to) * (through.x - from.x)) / d,
    );
    let radius = center.distance(&from);

    let angle = |p: Vec2| (p.y - center.y).atan2(p.x - center.x);
    let start = angle(from);
    let mid = angle(through);
    let end = angle(to);

    let tau = std::f32::consts::TAU;
    let ccw = |a: f32, b: f32| (b - a).rem_euclid(tau);

    // Sweep in whichever direction visits `through` before `to`
    let sweep = if ccw(start, mid) <= ccw(start, end) {
        ccw(start, end)
    } else {
        ccw(start, end) - tau
    };

    (0..=segments)
        .map(|i| {
            let a = start + sweep * (i as f32 / segments as f32);
            Vec2::new(center.x + radius * a.cos(), center.y + radius * a.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);

        assert_eq!((a + b).x, 5.0);
        assert_eq!((b - a).y, 4.0);
        assert_eq!((a * 2.0).y, 4.0);
        assert_eq!((-a).x, -1.0);
        assert!((a.distance(&b) - 5.0).abs() < 0.0001);
    }

    #[test]
    fn test_arc_through_hits_endpoints() {
        let from = Vec2::new(0.0, 10.0);
        let through = Vec2::new(5.0, 6.0);
        let to = Vec2::new(10.0, 10.0);
        let points = arc_through(from, through, to, 16);

        assert_eq!(points.len(), 17);
        assert!(points[0].distance(&from) < 0.001);
        assert!(points[16].distance(&to) < 0.001);
        // The arc bulges upward, toward `through`
        assert!(points[8].y < 10.0);
        assert!((points[8].y - 6.0).abs() < 0.01);
    }

    #[test]
    fn test_arc_through_collinear() {
        let points = arc_through(Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0), 8);
        assert_eq!(points.len(), 3);
    }
}
