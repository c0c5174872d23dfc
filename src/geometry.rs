//! Shared geometry types.
//!
//! Plain `f64` values with no knowledge of rendering; the view mapping and
//! hit-testing are built on top of these.

use serde::{Deserialize, Serialize};

/// A 2D point. Which space it lives in (screen or image) is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn sub(&self, other: &Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    pub fn add(&self, other: &Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }

    pub fn scale(&self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }

    /// Rotate about the origin by `degrees`.
    ///
    /// Screen space is y-down, so a positive angle turns clockwise on screen.
    pub fn rotate_deg(&self, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        Point::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both sides finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Whether `p` lies inside `[0, width] x [0, height]`.
    pub fn contains(&self, p: &Point) -> bool {
        p.x >= 0.0 && p.y >= 0.0 && p.x <= self.width && p.y <= self.height
    }

    /// Largest size with this aspect ratio that fits inside `bounds`, never
    /// upscaled past the original.
    pub fn fit_within(&self, bounds: Size) -> Size {
        let ratio = (bounds.width / self.width)
            .min(bounds.height / self.height)
            .min(1.0);
        Size::new(self.width * ratio, self.height * ratio)
    }
}

impl From<(f64, f64)> for Size {
    fn from((width, height): (f64, f64)) -> Self {
        Self::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!(approx_eq(a.distance_to(&b), 5.0));
        assert!(approx_eq(b.distance_to(&a), 5.0));
    }

    #[test]
    fn test_rotate_quarter_turn_is_clockwise_on_screen() {
        // +x (right) turns into +y (down)
        let p = Point::new(10.0, 0.0).rotate_deg(90.0);
        assert!(approx_eq(p.x, 0.0));
        assert!(approx_eq(p.y, 10.0));
    }

    #[test]
    fn test_rotate_inverse() {
        let p = Point::new(12.5, -7.25);
        let back = p.rotate_deg(37.0).rotate_deg(-37.0);
        assert!(approx_eq(back.x, p.x));
        assert!(approx_eq(back.y, p.y));
    }

    #[test]
    fn test_size_validity() {
        assert!(Size::new(1.0, 1.0).is_valid());
        assert!(!Size::new(0.0, 1.0).is_valid());
        assert!(!Size::new(1.0, -1.0).is_valid());
        assert!(!Size::new(f64::NAN, 1.0).is_valid());
    }

    #[test]
    fn test_fit_within_downscales_preserving_aspect() {
        let fitted = Size::new(2400.0, 1200.0).fit_within(Size::new(1200.0, 1200.0));
        assert!(approx_eq(fitted.width, 1200.0));
        assert!(approx_eq(fitted.height, 600.0));
    }

    #[test]
    fn test_fit_within_never_upscales() {
        let fitted = Size::new(800.0, 600.0).fit_within(Size::new(1200.0, 1200.0));
        assert_eq!(fitted, Size::new(800.0, 600.0));
    }

    #[test]
    fn test_contains_edges() {
        let size = Size::new(100.0, 50.0);
        assert!(size.contains(&Point::new(0.0, 0.0)));
        assert!(size.contains(&Point::new(100.0, 50.0)));
        assert!(!size.contains(&Point::new(-0.1, 10.0)));
        assert!(!size.contains(&Point::new(10.0, 50.1)));
    }
}
