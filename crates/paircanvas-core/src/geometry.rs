//! Geometric primitives for canvas layout.
//!
//! This module provides the geometric types used by the layout engine to
//! size groups, place leaves, and check placed content for overlap.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in canvas space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - An axis-aligned rectangle defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Canvas documents use a screen-style coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Nodes are anchored at their top-left corner, so "below" always means a
//! larger `y`.

/// A 2D point representing a position in canvas space.
///
/// # Examples
///
/// ```
/// # use paircanvas_core::geometry::Point;
/// let origin = Point::new(10.0, 20.0);
/// let below = origin.with_y(origin.y() + 60.0);
/// assert_eq!(below.x(), 10.0);
/// assert_eq!(below.y(), 80.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Creates a new point with the specified x-coordinate
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = x;
        self
    }

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = y;
        self
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }
}

/// An axis-aligned rectangle with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f64 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f64 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f64 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f64 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f64 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f64 {
        self.max_y - self.min_y
    }

    /// Returns the top-left corner as a Point
    pub fn min_point(self) -> Point {
        Point {
            x: self.min_x,
            y: self.min_y,
        }
    }

    /// Converts bounds to a Size object
    pub fn to_size(self) -> Size {
        Size {
            width: self.width(),
            height: self.height(),
        }
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use paircanvas_core::geometry::{Bounds, Point, Size};
    /// let plugin = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(364.0, 227.0));
    /// let appended = Bounds::new_from_top_left(Point::new(15.0, 240.0), Size::new(304.0, 92.0));
    ///
    /// let combined = plugin.merge(&appended);
    /// assert_eq!(combined.min_y(), 0.0);
    /// assert_eq!(combined.max_y(), 332.0);
    /// assert_eq!(combined.width(), 364.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Returns true when the interiors of the two rectangles overlap.
    ///
    /// Rectangles that only share an edge do not intersect.
    ///
    /// # Examples
    ///
    /// ```
    /// # use paircanvas_core::geometry::{Bounds, Point, Size};
    /// let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
    /// let b = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));
    /// let c = Bounds::new_from_top_left(Point::new(5.0, 5.0), Size::new(10.0, 10.0));
    ///
    /// assert!(!a.intersects(&b));
    /// assert!(a.intersects(&c));
    /// ```
    pub fn intersects(&self, other: &Self) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// Returns true when `other` lies entirely inside these bounds (edges included)
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && other.max_x <= self.max_x
            && other.max_y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let p = Point::new(3.0, 4.0);
        assert_eq!(p.x(), 3.0);
        assert_eq!(p.y(), 4.0);
    }

    #[test]
    fn test_point_with_coordinates() {
        let p = Point::new(3.0, 4.0).with_x(10.0).with_y(20.0);
        assert_eq!(p, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_bounds_new_from_top_left() {
        let bounds = Bounds::new_from_top_left(Point::new(15.0, 60.0), Size::new(334.0, 122.0));

        assert_eq!(bounds.min_x(), 15.0);
        assert_eq!(bounds.min_y(), 60.0);
        assert_eq!(bounds.max_x(), 349.0);
        assert_eq!(bounds.max_y(), 182.0);
        assert_eq!(bounds.width(), 334.0);
        assert_eq!(bounds.height(), 122.0);
        assert_eq!(bounds.min_point(), Point::new(15.0, 60.0));
        assert_eq!(bounds.to_size(), Size::new(334.0, 122.0));
    }

    #[test]
    fn test_bounds_merge() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_top_left(Point::new(-5.0, 20.0), Size::new(5.0, 5.0));

        let merged = a.merge(&b);
        assert_eq!(merged.min_x(), -5.0);
        assert_eq!(merged.min_y(), 0.0);
        assert_eq!(merged.max_x(), 10.0);
        assert_eq!(merged.max_y(), 25.0);
    }

    #[test]
    fn test_bounds_touching_edges_do_not_intersect() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let below = Bounds::new_from_top_left(Point::new(0.0, 10.0), Size::new(10.0, 10.0));
        let right = Bounds::new_from_top_left(Point::new(10.0, 0.0), Size::new(10.0, 10.0));

        assert!(!a.intersects(&below));
        assert!(!a.intersects(&right));
    }

    #[test]
    fn test_bounds_overlap_intersects() {
        let a = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(10.0, 10.0));
        let b = Bounds::new_from_top_left(Point::new(9.0, 9.0), Size::new(10.0, 10.0));

        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_bounds_contains() {
        let outer = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::new(100.0, 100.0));
        let inner = Bounds::new_from_top_left(Point::new(15.0, 15.0), Size::new(70.0, 85.0));
        let outside = Bounds::new_from_top_left(Point::new(50.0, 50.0), Size::new(70.0, 70.0));

        assert!(outer.contains(&inner));
        assert!(outer.contains(&outer));
        assert!(!outer.contains(&outside));
    }
}
