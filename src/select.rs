//! Box-selection queries over the placed shapes.
//!
//! Both policies test each shape's selection points against the marquee.
//! They are read-only: the result feeds the live preview while the marquee
//! is open and becomes the committed selection on release.

#[cfg(test)]
#[path = "select_test.rs"]
mod select_test;

use serde::{Deserialize, Serialize};

use crate::geom::SelectionBox;
use crate::shape::{ShapeId, ShapeStore};

/// How a marquee decides which shapes it selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Every selection point must lie inside the marquee.
    #[serde(alias = "window_selection")]
    Window,
    /// At least one selection point must lie inside the marquee.
    /// Unknown mode names fall back to this.
    #[default]
    #[serde(alias = "crossing_selection")]
    #[serde(other)]
    Crossing,
}

/// Shapes fully contained by `marquee`, in document order.
///
/// A shape without selection points is never fully contained.
#[must_use]
pub fn window_selection(shapes: &ShapeStore, marquee: &SelectionBox) -> Vec<ShapeId> {
    shapes
        .iter()
        .filter(|s| {
            let points = s.selection_points();
            !points.is_empty() && points.into_iter().all(|p| marquee.contains(p))
        })
        .map(|s| s.id())
        .collect()
}

/// Shapes with at least one selection point inside `marquee`, in document order.
#[must_use]
pub fn crossing_selection(shapes: &ShapeStore, marquee: &SelectionBox) -> Vec<ShapeId> {
    shapes
        .iter()
        .filter(|s| s.selection_points().into_iter().any(|p| marquee.contains(p)))
        .map(|s| s.id())
        .collect()
}

/// Run the query `mode` names.
#[must_use]
pub fn select_in_box(mode: SelectionMode, shapes: &ShapeStore, marquee: &SelectionBox) -> Vec<ShapeId> {
    match mode {
        SelectionMode::Window => window_selection(shapes, marquee),
        SelectionMode::Crossing => crossing_selection(shapes, marquee),
    }
}
