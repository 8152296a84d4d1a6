//! Geometric primitives for diagram placement.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Insets`] - Padding values for the four sides of a diagram
//!
//! # Coordinate System
//!
//! Trestle uses the SVG coordinate system:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! A node's entry point is the left edge of its main line; its exit point is
//! the right edge, `height` units below the entry.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use trestle_core::geometry::Point;
/// let entry = Point::new(20.0, 31.0);
/// assert_eq!(entry.x(), 20.0);
/// assert_eq!(entry.y(), 31.0);
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
}

/// Padding around a formatted diagram.
///
/// Each side defaults to 20 units. When built from partial values with
/// [`Insets::from_partial`], unset sides inherit a neighbour: right and
/// bottom inherit top, left inherits right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Insets {
    /// Padding used when a diagram is formatted without explicit insets.
    pub const DEFAULT_PADDING: f64 = 20.0;

    /// Creates new insets with specified values for each side
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates insets with the same value on every side
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Resolves partially specified padding.
    ///
    /// # Examples
    ///
    /// ```
    /// # use trestle_core::geometry::Insets;
    /// let insets = Insets::from_partial(Some(5.0), Some(8.0), None, None);
    /// assert_eq!(insets.bottom(), 5.0);
    /// assert_eq!(insets.left(), 8.0);
    ///
    /// let defaults = Insets::from_partial(None, None, None, None);
    /// assert_eq!(defaults, Insets::default());
    /// ```
    pub fn from_partial(
        top: Option<f64>,
        right: Option<f64>,
        bottom: Option<f64>,
        left: Option<f64>,
    ) -> Self {
        let top = top.unwrap_or(Self::DEFAULT_PADDING);
        let right = right.unwrap_or(top);
        let bottom = bottom.unwrap_or(top);
        let left = left.unwrap_or(right);
        Self::new(top, right, bottom, left)
    }

    /// Returns the top inset value
    pub fn top(self) -> f64 {
        self.top
    }

    /// Returns the right inset value
    pub fn right(self) -> f64 {
        self.right
    }

    /// Returns the bottom inset value
    pub fn bottom(self) -> f64 {
        self.bottom
    }

    /// Returns the left inset value
    pub fn left(self) -> f64 {
        self.left
    }

    /// Returns the sum of left and right insets
    pub fn horizontal_sum(self) -> f64 {
        self.left + self.right
    }

    /// Returns the sum of top and bottom insets
    pub fn vertical_sum(self) -> f64 {
        self.top + self.bottom
    }
}

impl Default for Insets {
    fn default() -> Self {
        Self::uniform(Self::DEFAULT_PADDING)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_new() {
        let point = Point::new(3.5, 4.25);
        assert_eq!(point.x(), 3.5);
        assert_eq!(point.y(), 4.25);
    }

    #[test]
    fn test_insets_default_is_twenty() {
        let insets = Insets::default();
        assert_eq!(insets.top(), 20.0);
        assert_eq!(insets.right(), 20.0);
        assert_eq!(insets.bottom(), 20.0);
        assert_eq!(insets.left(), 20.0);
    }

    #[test]
    fn test_insets_partial_inherits_neighbours() {
        let insets = Insets::from_partial(Some(4.0), None, None, None);
        assert_eq!(insets, Insets::uniform(4.0));

        let insets = Insets::from_partial(Some(4.0), Some(6.0), None, None);
        assert_eq!(insets.bottom(), 4.0);
        assert_eq!(insets.left(), 6.0);

        let insets = Insets::from_partial(None, None, Some(1.0), Some(2.0));
        assert_eq!(insets, Insets::new(20.0, 20.0, 1.0, 2.0));
    }

    #[test]
    fn test_insets_sums() {
        let insets = Insets::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(insets.horizontal_sum(), 6.0);
        assert_eq!(insets.vertical_sum(), 4.0);
    }
}
