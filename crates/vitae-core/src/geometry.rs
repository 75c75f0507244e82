#![forbid(unsafe_code)]

//! Geometric primitives in canvas space.
//!
//! Canvas coordinates are CSS pixels with the origin at the top-left corner.
//! Unlike cell-space geometry, positions may legitimately sit outside the
//! canvas (shapes drift past the edges before wrapping), so everything here is
//! `f64`.

/// A point in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Offset by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Dimensions of a drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CanvasSize {
    pub width: f64,
    pub height: f64,
}

impl CanvasSize {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and strictly positive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    /// Canvas midpoint.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// The shorter of the two sides.
    #[inline]
    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Area in square pixels.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether `point` lies within the canvas grown by `pad` on every edge
    /// (edges inclusive).
    #[inline]
    pub fn contains_padded(&self, point: Point, pad: f64) -> bool {
        point.x >= -pad
            && point.x <= self.width + pad
            && point.y >= -pad
            && point.y <= self.height + pad
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_requires_positive_finite() {
        assert!(CanvasSize::new(800.0, 600.0).is_valid());
        assert!(!CanvasSize::new(0.0, 600.0).is_valid());
        assert!(!CanvasSize::new(800.0, -1.0).is_valid());
        assert!(!CanvasSize::new(f64::NAN, 600.0).is_valid());
        assert!(!CanvasSize::new(800.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn center_and_min_side() {
        let size = CanvasSize::new(1200.0, 800.0);
        assert_eq!(size.center(), Point::new(600.0, 400.0));
        assert_eq!(size.min_side(), 800.0);
        assert_eq!(size.area(), 960_000.0);
    }

    #[test]
    fn padded_containment_is_inclusive() {
        let size = CanvasSize::new(100.0, 50.0);
        assert!(size.contains_padded(Point::new(-10.0, -10.0), 10.0));
        assert!(size.contains_padded(Point::new(110.0, 60.0), 10.0));
        assert!(!size.contains_padded(Point::new(110.1, 0.0), 10.0));
        assert!(!size.contains_padded(Point::new(0.0, -10.1), 10.0));
    }

    #[test]
    fn distance_is_euclidean() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.offset(3.0, 4.0), b);
    }
}
