//! Shape capability contract and the ordered store of placed shapes.
//!
//! The editor never looks inside a shape. It reads a bounding box and the
//! selection points used for marquee tests, and forwards pointer events to
//! the shape's own handlers once it has decided the shape should get them.
//! `ShapeStore` keeps shapes in document order, which is also the order
//! selection queries report matches in.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Point;
use crate::input::PointerEvent;

/// Unique identifier for a placed shape.
pub type ShapeId = Uuid;

/// Axis-aligned bounding box of a shape in local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width; never negative.
    pub width: f64,
    /// Height; never negative.
    pub height: f64,
}

impl BoundingBox {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// What a selectable item must provide to the editor.
pub trait Shape {
    /// Stable identity of this shape.
    fn id(&self) -> ShapeId;

    /// Current bounding box in local coordinates.
    fn bounding_box(&self) -> BoundingBox;

    /// Vertices and handles used for box-selection tests, in local coordinates.
    fn selection_points(&self) -> Vec<Point>;

    /// Pointer moved while this shape is being edited or dragged.
    ///
    /// `local` is the event position already mapped into document space.
    fn on_pointer_move(&mut self, event: &PointerEvent, local: Point);

    /// Pointer released while this shape is selected.
    fn on_pointer_up(&mut self, event: &PointerEvent, local: Point);

    /// Pointer left the surface while this shape is selected.
    fn on_pointer_out(&mut self, event: &PointerEvent);
}

/// Placed shapes in document order.
#[derive(Default)]
pub struct ShapeStore {
    shapes: Vec<Box<dyn Shape>>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Append a shape, or replace in place one that has the same id.
    pub fn insert(&mut self, shape: Box<dyn Shape>) {
        let id = shape.id();
        match self.position(id) {
            Some(index) => self.shapes[index] = shape,
            None => self.shapes.push(shape),
        }
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: ShapeId) -> Option<Box<dyn Shape>> {
        let index = self.position(id)?;
        Some(self.shapes.remove(index))
    }

    #[must_use]
    pub fn contains(&self, id: ShapeId) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn get(&self, id: ShapeId) -> Option<&dyn Shape> {
        let shape = self.shapes.iter().find(|s| s.id() == id)?;
        Some(&**shape)
    }

    pub fn get_mut(&mut self, id: ShapeId) -> Option<&mut (dyn Shape + 'static)> {
        let shape = self.shapes.iter_mut().find(|s| s.id() == id)?;
        Some(&mut **shape)
    }

    /// All shapes in document order.
    pub fn iter(&self) -> impl Iterator<Item = &(dyn Shape + 'static)> {
        self.shapes.iter().map(|s| &**s)
    }

    /// Ids of all shapes in document order.
    #[must_use]
    pub fn ids(&self) -> Vec<ShapeId> {
        self.shapes.iter().map(|s| s.id()).collect()
    }

    /// Run `f` on each listed shape that is still present, in list order.
    pub fn for_each_of<F>(&mut self, ids: &[ShapeId], mut f: F)
    where
        F: FnMut(&mut dyn Shape),
    {
        for id in ids {
            if let Some(shape) = self.get_mut(*id) {
                f(shape);
            }
        }
    }

    /// Number of shapes currently placed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if no shapes are placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }
}
