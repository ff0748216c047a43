//! Rectangle and point types shared by the crop and label engines.
//!
//! Two rectangle forms are used:
//! - [`InsetRect`]: distances from each edge of a container (crop box)
//! - [`AbsoluteRect`]: position, size and rotation (labels)
//!
//! All values are CSS pixels as `f64`.

use serde::{Deserialize, Serialize};

/// A point in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`.
    pub fn delta_from(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    /// Euclidean distance to another point.
    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Midpoint between two points.
    pub fn midpoint(self, other: Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Round both coordinates to whole pixels.
    pub fn rounded(self) -> Point {
        Point::new(self.x.round(), self.y.round())
    }
}

/// A rectangle expressed as insets from the edges of a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InsetRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl InsetRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Width of the rectangle inside a container of the given width.
    pub fn width_within(&self, container_width: f64) -> f64 {
        container_width - self.left - self.right
    }

    /// Height of the rectangle inside a container of the given height.
    pub fn height_within(&self, container_height: f64) -> f64 {
        container_height - self.top - self.bottom
    }

    /// Whether both horizontal insets are non-negative.
    pub fn horizontal_non_negative(&self) -> bool {
        self.left >= 0.0 && self.right >= 0.0
    }

    /// Whether both vertical insets are non-negative.
    pub fn vertical_non_negative(&self) -> bool {
        self.top >= 0.0 && self.bottom >= 0.0
    }

    /// Shift the rectangle without resizing it.
    ///
    /// Positive `dx` moves right, positive `dy` moves down.
    pub fn translated(&self, dx: f64, dy: f64) -> InsetRect {
        InsetRect {
            left: self.left + dx,
            right: self.right - dx,
            top: self.top + dy,
            bottom: self.bottom - dy,
        }
    }
}

/// A positioned, sized and rotated rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteRect {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
    /// Rotation in degrees, unbounded.
    pub rotation: f64,
}

impl AbsoluteRect {
    pub fn new(top: f64, left: f64, width: f64, height: f64, rotation: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
            rotation,
        }
    }
}

/// Snapshot of a layout container's bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerDimension {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

impl ContainerDimension {
    pub fn new(width: f64, height: f64, left: f64, top: f64) -> Self {
        Self {
            width,
            height,
            left,
            top,
        }
    }

    /// Translate a viewport point into container-local space.
    pub fn to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Whether a container-local point lies within the container (edges included).
    pub fn contains_local(&self, local: Point) -> bool {
        (0.0..=self.width).contains(&local.x) && (0.0..=self.height).contains(&local.y)
    }
}

/// A measured bounding box in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Bounding box of an inset rectangle inside a container.
    pub fn from_inset(inset: &InsetRect, container: &ContainerDimension) -> Self {
        Self {
            left: container.left + inset.left,
            top: container.top + inset.top,
            width: inset.width_within(container.width),
            height: inset.height_within(container.height),
        }
    }
}
