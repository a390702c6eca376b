//! Geometric primitives for graph layout.
//!
//! This module provides the geometric types used throughout frlayout for
//! computing node positions, node sizes, and drawing extents.
//!
//! # Overview
//!
//! - [`Vector2`] - A 2D vector, used both as a position and as a displacement
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//! - [`Insets`] - Padding values for four sides
//!
//! # Coordinate System
//!
//! frlayout uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! A node's position is the top-left corner of its box.

use serde::Deserialize;

/// A 2D vector in layout coordinate space.
///
/// Vectors are plain values: every operation returns a new vector and leaves
/// its operands untouched.
///
/// # Examples
///
/// ```
/// # use frlayout_core::geometry::Vector2;
/// let a = Vector2::new(10.0, 20.0);
/// let b = Vector2::new(4.0, 8.0);
///
/// let diff = a.sub_vector(b);
/// assert_eq!(diff, Vector2::new(6.0, 12.0));
///
/// let halved = diff.divide(2.0);
/// assert_eq!(halved.x(), 3.0);
/// assert_eq!(halved.y(), 6.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
    x: f64,
    y: f64,
}

impl Vector2 {
    /// Creates a new vector with the specified components
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The zero vector
    pub fn zero() -> Self {
        Self::default()
    }

    /// Returns the x component
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y component
    pub fn y(self) -> f64 {
        self.y
    }

    /// Checks if both components are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Checks that neither component is NaN or infinite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Adds another vector to this one, returning a new vector
    pub fn add_vector(self, other: Vector2) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another vector from this one, returning a new vector
    pub fn sub_vector(self, other: Vector2) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }

    /// Multiplies both components by the given factor.
    ///
    /// # Examples
    ///
    /// ```
    /// # use frlayout_core::geometry::Vector2;
    /// let v = Vector2::new(10.0, -20.0);
    /// assert_eq!(v.scale(2.0), Vector2::new(20.0, -40.0));
    /// assert_eq!(v.scale(0.5), Vector2::new(5.0, -10.0));
    /// ```
    pub fn scale(self, factor: f64) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Divides both components by the given divisor
    pub fn divide(self, divisor: f64) -> Self {
        Self {
            x: self.x / divisor,
            y: self.y / divisor,
        }
    }

    /// Euclidean length of the vector
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Returns the unit vector pointing in the same direction.
    ///
    /// The zero vector has no direction, so `None` is returned for it. This is
    /// the case a force computation hits when two nodes share a position.
    ///
    /// # Examples
    ///
    /// ```
    /// # use frlayout_core::geometry::Vector2;
    /// let unit = Vector2::new(3.0, 4.0).normalize().unwrap();
    /// assert_eq!(unit, Vector2::new(0.6, 0.8));
    ///
    /// assert!(Vector2::zero().normalize().is_none());
    /// ```
    pub fn normalize(self) -> Option<Self> {
        let length = self.length();
        if length == 0.0 || !length.is_finite() {
            return None;
        }
        Some(self.divide(length))
    }

    /// Clamps each component independently into `[0, area.width()]` and
    /// `[0, area.height()]`.
    pub fn clamp_to(self, area: Size) -> Self {
        Self {
            x: self.x.clamp(0.0, area.width),
            y: self.y.clamp(0.0, area.height),
        }
    }

    /// Center of a box whose top-left corner is this vector
    pub fn box_center(self, size: Size) -> Self {
        Self {
            x: self.x + size.width / 2.0,
            y: self.y + size.height / 2.0,
        }
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

    /// Area covered by this size
    pub fn area(self) -> f64 {
        self.width * self.height
    }

    /// Returns true if both dimensions are finite and strictly positive
    pub fn is_positive(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Vector2, size: Size) -> Self {
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

    /// Checks whether a point lies inside the bounds, edges included
    pub fn contains(self, point: Vector2) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Merges two bounds to create a larger bounds that contains both.
    ///
    /// # Examples
    ///
    /// ```
    /// # use frlayout_core::geometry::{Bounds, Size, Vector2};
    /// let canvas = Bounds::new_from_top_left(Vector2::zero(), Size::new(500.0, 500.0));
    /// let node = Bounds::new_from_top_left(Vector2::new(480.0, 10.0), Size::new(40.0, 20.0));
    ///
    /// let combined = canvas.merge(&node);
    /// assert_eq!(combined.min_x(), 0.0);
    /// assert_eq!(combined.width(), 520.0);
    /// assert_eq!(combined.height(), 500.0);
    /// ```
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// Expands the bounds by adding insets on every side
    pub fn add_padding(&self, insets: Insets) -> Self {
        Self {
            min_x: self.min_x - insets.left,
            min_y: self.min_y - insets.top,
            max_x: self.max_x + insets.right,
            max_y: self.max_y + insets.bottom,
        }
    }
}

/// Represents spacing around an element with potentially different values
/// for each side.
///
/// Deserializes from a table with `top`, `right`, `bottom` and `left` keys;
/// missing keys default to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Insets {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Insets {
    /// Creates new insets with specified values for each side
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Creates uniform insets with the same value for all sides
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
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
}
