//! Vector primitives and the marquee box used for box selection.
//!
//! Points double as 2-D vectors here. The marquee keeps the signed width and
//! height produced by the drag, so containment has to consider which way the
//! box was drawn.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::Serialize;

use crate::camera::Point;

/// Component-wise difference `u - v`.
#[must_use]
pub fn subtract(u: Point, v: Point) -> Point {
    Point { x: u.x - v.x, y: u.y - v.y }
}

/// Dot product of `u` and `v`.
#[must_use]
pub fn dot(u: Point, v: Point) -> f64 {
    u.x * v.x + u.y * v.y
}

/// Scalar projection of `u` onto `v`, as a multiple of `v`.
///
/// Not finite when `v` is the zero vector; callers guard against that.
#[must_use]
pub fn project_scalar(u: Point, v: Point) -> f64 {
    dot(u, v) / dot(v, v)
}

/// An in-progress marquee: an origin plus a signed extent.
///
/// `width` and `height` are negative when the drag went left or up from the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SelectionBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionBox {
    /// A zero-size box anchored at `origin`.
    #[must_use]
    pub fn at(origin: Point) -> Self {
        Self { x: origin.x, y: origin.y, width: 0.0, height: 0.0 }
    }

    /// Stretch the box so its far corner sits on `corner`.
    pub fn extend_to(&mut self, corner: Point) {
        self.width = corner.x - self.x;
        self.height = corner.y - self.y;
    }

    /// Whether `point` lies inside the box (edges inclusive).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point_within_box(point, self)
    }
}

/// Edge-inclusive containment test for a box drawn in any direction.
#[must_use]
pub fn point_within_box(point: Point, rect: &SelectionBox) -> bool {
    let far_x = rect.x + rect.width;
    let far_y = rect.y + rect.height;
    match (rect.width >= 0.0, rect.height >= 0.0) {
        (true, true) => point.x >= rect.x && point.y >= rect.y && point.x <= far_x && point.y <= far_y,
        (true, false) => point.x >= rect.x && point.y <= rect.y && point.x <= far_x && point.y >= far_y,
        (false, true) => point.x <= rect.x && point.y >= rect.y && point.x >= far_x && point.y <= far_y,
        (false, false) => point.x <= rect.x && point.y <= rect.y && point.x >= far_x && point.y >= far_y,
    }
}
