//! Linear gradient editing: endpoint drags and color-stop drags.
//!
//! Endpoints are stored as fractions of the painted shape's bounding box so
//! the gradient survives resizing. A stop drag projects the pointer onto the
//! gradient axis to get the new offset, then restores ascending order with at
//! most one adjacent swap per call. `LinearGradient` owns the stop list; the
//! only way to reorder it is `swap_adjacent`, which also reports the element
//! move the host needs to keep its visual order in sync.

#[cfg(test)]
#[path = "gradient_test.rs"]
mod gradient_test;

use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::camera::Point;
use crate::consts::AXIS_EPSILON;
use crate::geom::{dot, project_scalar, subtract};
use crate::shape::{BoundingBox, ShapeId};

/// Identifier of a stop's visual element.
pub type StopId = Uuid;

/// Error returned by gradient handle lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GradientError {
    /// The stop index is past the end of the stop list.
    #[error("stop index {index} out of range for {len} stops")]
    StopOutOfRange { index: usize, len: usize },
    /// The host sent a handle code other than -1, -2, or a stop index.
    #[error("invalid gradient handle code: {0}")]
    InvalidHandle(i32),
}

/// Which part of the gradient is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopHandle {
    /// The start point `(x1, y1)`.
    Start,
    /// The end point `(x2, y2)`.
    End,
    /// The color stop at this index.
    Stop(usize),
}

impl StopHandle {
    /// Decode the host's handle code: -1 start, -2 end, otherwise a stop index.
    ///
    /// # Errors
    ///
    /// Returns [`GradientError::InvalidHandle`] for any other negative code.
    pub fn from_sentinel(code: i32) -> Result<Self, GradientError> {
        match code {
            -1 => Ok(Self::Start),
            -2 => Ok(Self::End),
            n => usize::try_from(n).map(Self::Stop).map_err(|_| GradientError::InvalidHandle(code)),
        }
    }
}

/// A color at an offset along the gradient axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Identity of the stop's visual element.
    pub id: StopId,
    /// Position along the axis, in `[0, 1]`.
    pub offset: f64,
    /// CSS color string.
    pub color: String,
    /// Stop opacity, in `[0, 1]`.
    pub opacity: f64,
}

impl GradientStop {
    #[must_use]
    pub fn new(offset: f64, color: impl Into<String>) -> Self {
        Self { id: Uuid::new_v4(), offset: offset.clamp(0.0, 1.0), color: color.into(), opacity: 1.0 }
    }
}

/// A visual-order update: move `element` so it sits directly before `before`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StopReorder {
    pub element: StopId,
    pub before: StopId,
}

/// Result of one drag step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// An endpoint moved; the new fractional position.
    EndpointMoved { handle: StopHandle, at: Point },
    /// A stop's offset changed. `handle` follows the stop if it was swapped.
    StopMoved { handle: StopHandle, stop: StopId, offset: f64, reorder: Option<StopReorder> },
}

impl DragOutcome {
    /// The handle to keep dragging on the next move.
    #[must_use]
    pub fn handle(&self) -> StopHandle {
        match *self {
            Self::EndpointMoved { handle, .. } | Self::StopMoved { handle, .. } => handle,
        }
    }
}

/// A linear gradient open for editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub id: Uuid,
    /// The shape this gradient paints. Not owned.
    pub editing_shape: ShapeId,
    /// Start point, as fractions of the bounding box.
    pub x1: f64,
    pub y1: f64,
    /// End point, as fractions of the bounding box.
    pub x2: f64,
    pub y2: f64,
    stops: Vec<GradientStop>,
}

impl LinearGradient {
    /// A left-to-right gradient with no stops, painting `editing_shape`.
    #[must_use]
    pub fn new(editing_shape: ShapeId) -> Self {
        Self { id: Uuid::new_v4(), editing_shape, x1: 0.0, y1: 0.0, x2: 1.0, y2: 0.0, stops: Vec::new() }
    }

    /// Stops in ascending offset order.
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }

    /// Insert a stop after every stop with an offset not greater than its own.
    pub fn add_stop(&mut self, stop: GradientStop) -> usize {
        let index = self.stops.partition_point(|s| s.offset <= stop.offset);
        self.stops.insert(index, stop);
        index
    }

    /// Whether offsets are in ascending order.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.stops.windows(2).all(|w| w[0].offset <= w[1].offset)
    }

    /// Restore ascending offset order. Stops with equal offsets keep their relative order.
    ///
    /// Returns `true` if anything moved.
    pub fn sort_stops(&mut self) -> bool {
        if self.is_sorted() {
            return false;
        }
        self.stops.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        true
    }

    /// Check that `handle` refers to something that exists.
    ///
    /// # Errors
    ///
    /// Returns [`GradientError::StopOutOfRange`] for a stop index past the end.
    pub fn validate(&self, handle: StopHandle) -> Result<(), GradientError> {
        match handle {
            StopHandle::Stop(index) if index >= self.stops.len() => {
                Err(GradientError::StopOutOfRange { index, len: self.stops.len() })
            }
            _ => Ok(()),
        }
    }

    /// Swap the stops at `lower` and `lower + 1`.
    ///
    /// Returns the element move that brings the visual order in line, or
    /// `None` if `lower + 1` is out of range.
    pub fn swap_adjacent(&mut self, lower: usize) -> Option<StopReorder> {
        let upper = lower.checked_add(1).filter(|u| *u < self.stops.len())?;
        self.stops.swap(lower, upper);
        Some(StopReorder { element: self.stops[lower].id, before: self.stops[upper].id })
    }

    /// Apply one pointer move to `handle`.
    ///
    /// `local` is the pointer in document space; `bbox` is the bounding box of
    /// the painted shape.
    ///
    /// # Errors
    ///
    /// Returns [`GradientError::StopOutOfRange`] if a stop handle is stale.
    pub fn drag(&mut self, handle: StopHandle, bbox: BoundingBox, local: Point) -> Result<DragOutcome, GradientError> {
        let external = subtract(local, bbox.origin());
        match handle {
            StopHandle::Start => {
                (self.x1, self.y1) = fraction_of(external, bbox, (self.x1, self.y1));
                Ok(DragOutcome::EndpointMoved { handle, at: Point::new(self.x1, self.y1) })
            }
            StopHandle::End => {
                (self.x2, self.y2) = fraction_of(external, bbox, (self.x2, self.y2));
                Ok(DragOutcome::EndpointMoved { handle, at: Point::new(self.x2, self.y2) })
            }
            StopHandle::Stop(index) => self.drag_stop(index, bbox, external),
        }
    }

    fn drag_stop(&mut self, index: usize, bbox: BoundingBox, external: Point) -> Result<DragOutcome, GradientError> {
        let len = self.stops.len();
        if index >= len {
            return Err(GradientError::StopOutOfRange { index, len });
        }

        let p1 = Point::new(self.x1 * bbox.width, self.y1 * bbox.height);
        let p2 = Point::new(self.x2 * bbox.width, self.y2 * bbox.height);
        let axis = subtract(p2, p1);
        let scalar = if dot(axis, axis) <= AXIS_EPSILON {
            warn!(gradient = %self.id, "degenerate gradient axis; stop offset pinned to 0");
            0.0
        } else {
            project_scalar(subtract(external, p1), axis)
        };
        let offset = scalar.clamp(0.0, 1.0);
        self.stops[index].offset = offset;
        let stop = self.stops[index].id;

        // Single adjacent swap; a drag across two neighbors in one move is not cascaded.
        if index > 0 && self.stops[index - 1].offset > offset {
            let reorder = self.swap_adjacent(index - 1);
            return Ok(DragOutcome::StopMoved { handle: StopHandle::Stop(index - 1), stop, offset, reorder });
        }
        if index + 1 < len && offset > self.stops[index + 1].offset {
            let reorder = self.swap_adjacent(index);
            return Ok(DragOutcome::StopMoved { handle: StopHandle::Stop(index + 1), stop, offset, reorder });
        }
        Ok(DragOutcome::StopMoved { handle: StopHandle::Stop(index), stop, offset, reorder: None })
    }
}

/// Express a shape-local point as bounding-box fractions. A zero extent keeps `previous` on that axis.
fn fraction_of(external: Point, bbox: BoundingBox, previous: (f64, f64)) -> (f64, f64) {
    let x = if bbox.width.abs() < f64::EPSILON { previous.0 } else { external.x / bbox.width };
    let y = if bbox.height.abs() < f64::EPSILON { previous.1 } else { external.y / bbox.height };
    (x, y)
}
