//! Pointer dispatcher for the editor surface.
//!
//! `EditorCore` turns host pointer and wheel events into panning, zooming,
//! marquee selection, shape delegation, and gradient handle drags. Every
//! handler runs to completion and returns the [`Action`]s the host must apply
//! (camera update, selection change, stop element reorder, redraw).
//!
//! Gradient drags, single-shape edits, and marked shapes are entered from
//! outside (a shape or a handle reacts to its own pointer-down first) through
//! the `begin_*` and `mark_*` methods; the dispatcher only decides, per event,
//! which of them gets the pointer.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::camera::{Camera, Point};
use crate::config::Settings;
use crate::geom::SelectionBox;
use crate::gradient::{DragOutcome, GradientError, LinearGradient, StopHandle, StopId};
use crate::input::{Button, EditMode, Gesture, PointerEvent, PointerKind, WheelEvent};
use crate::select::select_in_box;
use crate::shape::{Shape, ShapeId, ShapeStore};

/// Error returned by the externally-triggered mode entries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditorError {
    /// No placed shape has this id.
    #[error("unknown shape: {0}")]
    UnknownShape(ShapeId),
    /// A gradient handle was grabbed while no gradient is open.
    #[error("no gradient is open for editing")]
    NoGradient,
    /// The gradient rejected the handle.
    #[error(transparent)]
    Gradient(#[from] GradientError),
}

/// Actions returned from handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    RenderNeeded,
    CameraChanged { translate: Point, scale: f64 },
    /// The open marquee changed; `preview` lists the shapes it currently matches.
    PreviewChanged { marquee: SelectionBox, preview: Vec<ShapeId> },
    SelectionChanged { selected: Vec<ShapeId> },
    /// A gradient endpoint moved; `at` is in bounding-box fractions.
    GradientEndpointMoved { handle: StopHandle, at: Point },
    StopOffsetChanged { stop: StopId, offset: f64 },
    /// Move the `element` stop node directly before the `before` node.
    StopReordered { element: StopId, before: StopId },
    /// A context menu should open at this device-space point.
    ContextMenuAnchored { at: Point },
    GradientClosed,
}

/// Interaction state for one editor surface.
#[derive(Default)]
pub struct EditorCore {
    pub shapes: ShapeStore,
    pub camera: Camera,
    pub settings: Settings,
    gesture: Gesture,
    selected: Vec<ShapeId>,
    marked: Vec<ShapeId>,
    hovered: Vec<ShapeId>,
    /// Marquee matches set aside when an exclusive edit took over mid-marquee.
    pending_preview: Vec<ShapeId>,
    focused: Option<ShapeId>,
    gradient: Option<LinearGradient>,
    edit_mode: EditMode,
    last_right_click: Option<Point>,
}

impl EditorCore {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings, ..Self::default() }
    }

    // --- Queries ---

    /// The active gesture.
    #[must_use]
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Committed selection, in commit order.
    #[must_use]
    pub fn selected(&self) -> &[ShapeId] {
        &self.selected
    }

    /// Shapes pinned for group dragging.
    #[must_use]
    pub fn marked(&self) -> &[ShapeId] {
        &self.marked
    }

    /// Shapes the pointer is currently over; cleared on every pointer-up.
    #[must_use]
    pub fn hovered(&self) -> &[ShapeId] {
        &self.hovered
    }

    #[must_use]
    pub fn focused(&self) -> Option<ShapeId> {
        self.focused
    }

    /// The gradient open for editing, if any.
    #[must_use]
    pub fn gradient(&self) -> Option<&LinearGradient> {
        self.gradient.as_ref()
    }

    #[must_use]
    pub fn edit_mode(&self) -> EditMode {
        self.edit_mode
    }

    /// Device-space point of the last right-click or context-menu release.
    #[must_use]
    pub fn last_right_click(&self) -> Option<Point> {
        self.last_right_click
    }

    /// The open marquee, if one is being drawn.
    #[must_use]
    pub fn selection_box(&self) -> Option<&SelectionBox> {
        match &self.gesture {
            Gesture::Marqueeing { marquee, .. } => Some(marquee),
            _ => None,
        }
    }

    /// Live marquee preview, if a marquee is open.
    #[must_use]
    pub fn preview(&self) -> Option<&[ShapeId]> {
        match &self.gesture {
            Gesture::Marqueeing { preview, .. } => Some(preview),
            _ => None,
        }
    }

    /// Local point of the last group-drag move.
    #[must_use]
    pub fn move_panner(&self) -> Option<Point> {
        match self.gesture {
            Gesture::DraggingMarked { last_local } => Some(last_local),
            _ => None,
        }
    }

    // --- Document ---

    /// Place a shape (or replace the one with the same id).
    pub fn insert_shape(&mut self, shape: Box<dyn Shape>) {
        self.shapes.insert(shape);
    }

    /// Remove a shape and every reference the editor holds to it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Box<dyn Shape>> {
        let removed = self.shapes.remove(id)?;
        self.selected.retain(|s| *s != id);
        self.marked.retain(|s| *s != id);
        self.hovered.retain(|s| *s != id);
        if self.focused == Some(id) {
            self.focused = None;
        }
        if matches!(self.gesture, Gesture::EditingShape { id: editing } if editing == id) {
            self.set_gesture(Gesture::Idle);
        }
        if let Gesture::Marqueeing { preview, .. } = &mut self.gesture {
            preview.retain(|s| *s != id);
        }
        self.pending_preview.retain(|s| *s != id);
        if self.gradient.as_ref().is_some_and(|g| g.editing_shape == id) {
            self.close_gradient();
        }
        Some(removed)
    }

    // --- Externally-triggered state ---

    pub fn set_edit_mode(&mut self, mode: EditMode) {
        self.edit_mode = mode;
    }

    /// Add a shape to the committed selection.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownShape`] if `id` is not placed.
    pub fn select_shape(&mut self, id: ShapeId) -> Result<(), EditorError> {
        self.require_shape(id)?;
        push_unique(&mut self.selected, id);
        Ok(())
    }

    /// Pin a shape for group dragging.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownShape`] if `id` is not placed.
    pub fn mark_shape(&mut self, id: ShapeId) -> Result<(), EditorError> {
        self.require_shape(id)?;
        push_unique(&mut self.marked, id);
        Ok(())
    }

    pub fn unmark_shape(&mut self, id: ShapeId) {
        self.marked.retain(|s| *s != id);
    }

    /// Record that the pointer is over a shape.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownShape`] if `id` is not placed.
    pub fn hover_shape(&mut self, id: ShapeId) -> Result<(), EditorError> {
        self.require_shape(id)?;
        push_unique(&mut self.hovered, id);
        Ok(())
    }

    /// Give a shape keyboard/edit focus.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownShape`] if `id` is not placed.
    pub fn focus_shape(&mut self, id: ShapeId) -> Result<(), EditorError> {
        self.require_shape(id)?;
        self.focused = Some(id);
        Ok(())
    }

    pub fn unfocus_shape(&mut self) {
        self.focused = None;
    }

    /// Drop the committed selection and the marked set.
    pub fn clear_selection(&mut self) {
        self.selected.clear();
        self.marked.clear();
    }

    /// Hand the pointer exclusively to one shape until the next pointer-up.
    ///
    /// An armed pan or a gradient drag keeps priority; the request is then ignored.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownShape`] if `id` is not placed.
    pub fn begin_shape_edit(&mut self, id: ShapeId) -> Result<(), EditorError> {
        self.require_shape(id)?;
        match self.gesture {
            Gesture::Panning { .. } | Gesture::EditingGradient { .. } => {
                debug!(shape = %id, gesture = self.gesture.name(), "shape edit outranked; ignoring");
            }
            _ => {
                self.stash_preview();
                self.set_gesture(Gesture::EditingShape { id });
            }
        }
        Ok(())
    }

    /// Open a gradient for editing, replacing any gradient already open.
    ///
    /// Stops that arrive out of offset order are sorted first.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::UnknownShape`] if the gradient's shape is not placed.
    pub fn open_gradient(&mut self, mut gradient: LinearGradient) -> Result<(), EditorError> {
        self.require_shape(gradient.editing_shape)?;
        if gradient.sort_stops() {
            warn!(gradient = %gradient.id, "gradient stops out of order; sorted on open");
        }
        if matches!(self.gesture, Gesture::EditingGradient { .. }) {
            self.set_gesture(Gesture::Idle);
        }
        debug!(gradient = %gradient.id, shape = %gradient.editing_shape, "gradient opened");
        self.gradient = Some(gradient);
        Ok(())
    }

    /// Close the gradient edit context, ending any handle drag on it.
    pub fn close_gradient(&mut self) -> Option<LinearGradient> {
        if matches!(self.gesture, Gesture::EditingGradient { .. }) {
            self.set_gesture(Gesture::Idle);
        }
        let closed = self.gradient.take();
        if let Some(g) = &closed {
            debug!(gradient = %g.id, "gradient closed");
        }
        closed
    }

    /// Start dragging a gradient endpoint or stop. An armed pan keeps priority.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoGradient`] when no gradient is open and
    /// [`EditorError::Gradient`] when the stop index does not exist.
    pub fn begin_gradient_drag(&mut self, handle: StopHandle) -> Result<(), EditorError> {
        let gradient = self.gradient.as_ref().ok_or(EditorError::NoGradient)?;
        gradient.validate(handle)?;
        if matches!(self.gesture, Gesture::Panning { .. }) {
            debug!(?handle, "panning in progress; gradient drag ignored");
            return Ok(());
        }
        self.stash_preview();
        self.set_gesture(Gesture::EditingGradient { handle });
        Ok(())
    }

    /// Abandon the current gesture without committing it (pointer lost, blur).
    pub fn cancel(&mut self) -> Vec<Action> {
        self.hovered.clear();
        self.pending_preview.clear();
        if self.gesture.is_idle() {
            return Vec::new();
        }
        self.set_gesture(Gesture::Idle);
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    /// Middle button arms panning; any other button opens a marquee unless an edit owns the pointer.
    pub fn on_pointer_down(&mut self, event: &PointerEvent) -> Vec<Action> {
        if event.button == Button::Middle {
            if self.settings.disable_panning {
                trace!("panning disabled; middle press ignored");
                return Vec::new();
            }
            self.set_gesture(Gesture::Panning { anchor: event.offset });
            return Vec::new();
        }

        if self.settings.disable_box_selection {
            trace!("box selection disabled; press ignored");
            return Vec::new();
        }
        if matches!(
            self.gesture,
            Gesture::Panning { .. } | Gesture::EditingGradient { .. } | Gesture::EditingShape { .. }
        ) {
            return Vec::new();
        }
        let local = self.camera.local_detransform(event.offset);
        self.pending_preview.clear();
        self.set_gesture(Gesture::Marqueeing { marquee: SelectionBox::at(local), preview: Vec::new() });
        vec![Action::RenderNeeded]
    }

    /// Route a move to the highest-priority active gesture.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> Vec<Action> {
        if let Gesture::Panning { anchor } = self.gesture {
            return self.pan(anchor, event.offset);
        }
        let local = self.camera.local_detransform(event.offset);
        match self.gesture {
            Gesture::EditingGradient { handle } => self.drag_gradient(handle, local),
            Gesture::EditingShape { id } => self.edit_shape(id, event, local),
            Gesture::Marqueeing { .. } if self.marked.is_empty() => self.grow_marquee(local),
            _ => self.drag_marked(event, local),
        }
    }

    /// End the active gesture and commit any pending marquee preview.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> Vec<Action> {
        let mut actions = Vec::new();
        let local = self.camera.local_detransform(event.offset);
        self.hovered.clear();

        // Ends shape edits, marquees, gradient drags (the gradient stays open), and group drags.
        let mut previous = std::mem::take(&mut self.gesture);
        let mut pending = std::mem::take(&mut self.pending_preview);
        if let Gesture::Marqueeing { preview, .. } = &mut previous {
            pending = std::mem::take(preview);
        }
        let mut selection_changed = false;
        if !pending.is_empty() {
            debug!(count = pending.len(), "marquee selection committed");
            self.selected = pending;
            self.focused = None;
            selection_changed = true;
        }

        self.shapes.for_each_of(&self.selected, |s| s.on_pointer_up(event, local));

        let context_menu = event.button == Button::Secondary || event.kind == PointerKind::ContextMenu;
        let middle_release = !context_menu && event.button == Button::Middle;
        if context_menu {
            self.last_right_click = Some(event.offset);
            actions.push(Action::ContextMenuAnchored { at: event.offset });
        } else if middle_release {
            selection_changed |= !self.selected.is_empty() || !self.marked.is_empty();
            self.clear_selection();
        }

        if matches!(previous, Gesture::Panning { .. }) && !middle_release {
            self.gesture = previous;
        } else if !previous.is_idle() {
            debug!(from = previous.name(), to = self.gesture.name(), "gesture transition");
        }

        if self.edit_mode == EditMode::Move {
            self.edit_mode = EditMode::None;
        }
        if selection_changed {
            actions.push(Action::SelectionChanged { selected: self.selected.clone() });
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Forward a pointer-out to the selected shapes. The gesture is left as is.
    pub fn on_pointer_out(&mut self, event: &PointerEvent) -> Vec<Action> {
        self.shapes.for_each_of(&self.selected, |s| s.on_pointer_out(event));
        Vec::new()
    }

    /// Zoom around the pointer: scrolling up zooms in, down zooms out.
    pub fn on_wheel(&mut self, event: &WheelEvent) -> Vec<Action> {
        let step = self.settings.zoom_step;
        if event.delta.dy < 0.0 {
            self.camera.zoom_in(event.offset, step);
        } else if event.delta.dy > 0.0 {
            self.camera.zoom_out(event.offset, step);
        } else {
            return Vec::new();
        }
        trace!(scale = self.camera.scale, "zoomed");
        vec![self.camera_changed(), Action::RenderNeeded]
    }

    /// Click on empty canvas: drop selection, marks, focus, and the open gradient.
    ///
    /// Does nothing while placing a new shape or when Ctrl (multi-select) is held.
    pub fn unselect(&mut self, event: &PointerEvent) -> Vec<Action> {
        if self.edit_mode == EditMode::Add || event.modifiers.ctrl {
            return Vec::new();
        }
        let mut actions = Vec::new();
        self.edit_mode = EditMode::None;
        if !self.selected.is_empty() || !self.marked.is_empty() {
            self.clear_selection();
            actions.push(Action::SelectionChanged { selected: Vec::new() });
        }
        self.unfocus_shape();
        if self.close_gradient().is_some() {
            actions.push(Action::GradientClosed);
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Gesture bodies ---

    /// Incremental pan: apply the delta since `anchor`, then re-anchor.
    fn pan(&mut self, anchor: Point, to: Point) -> Vec<Action> {
        self.camera.pan_by(to.x - anchor.x, to.y - anchor.y);
        self.gesture = Gesture::Panning { anchor: to };
        vec![self.camera_changed(), Action::RenderNeeded]
    }

    fn drag_gradient(&mut self, handle: StopHandle, local: Point) -> Vec<Action> {
        let Some(shape_id) = self.gradient.as_ref().map(|g| g.editing_shape) else {
            warn!("gradient drag without an open gradient; ending drag");
            self.set_gesture(Gesture::Idle);
            return Vec::new();
        };
        let Some(bbox) = self.shapes.get(shape_id).map(Shape::bounding_box) else {
            warn!(shape = %shape_id, "gradient shape missing; move ignored");
            return Vec::new();
        };
        let Some(gradient) = self.gradient.as_mut() else {
            return Vec::new();
        };

        let outcome = match gradient.drag(handle, bbox, local) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "stale gradient handle; ending drag");
                self.set_gesture(Gesture::Idle);
                return Vec::new();
            }
        };
        self.gesture = Gesture::EditingGradient { handle: outcome.handle() };

        let mut actions = Vec::new();
        match outcome {
            DragOutcome::EndpointMoved { handle, at } => {
                actions.push(Action::GradientEndpointMoved { handle, at });
            }
            DragOutcome::StopMoved { stop, offset, reorder, .. } => {
                actions.push(Action::StopOffsetChanged { stop, offset });
                if let Some(r) = reorder {
                    trace!(element = %r.element, before = %r.before, "stop reordered");
                    actions.push(Action::StopReordered { element: r.element, before: r.before });
                }
            }
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn edit_shape(&mut self, id: ShapeId, event: &PointerEvent, local: Point) -> Vec<Action> {
        let Some(shape) = self.shapes.get_mut(id) else {
            warn!(shape = %id, "edited shape missing; ending edit");
            self.set_gesture(Gesture::Idle);
            return Vec::new();
        };
        shape.on_pointer_move(event, local);
        vec![Action::RenderNeeded]
    }

    fn grow_marquee(&mut self, local: Point) -> Vec<Action> {
        let Gesture::Marqueeing { marquee, preview } = &mut self.gesture else {
            return Vec::new();
        };
        marquee.extend_to(local);
        *preview = select_in_box(self.settings.selection_mode, &self.shapes, marquee);
        trace!(matched = preview.len(), "marquee preview");
        vec![Action::PreviewChanged { marquee: *marquee, preview: preview.clone() }, Action::RenderNeeded]
    }

    fn drag_marked(&mut self, event: &PointerEvent, local: Point) -> Vec<Action> {
        if self.marked.is_empty() && self.gesture.is_idle() {
            return Vec::new();
        }
        self.shapes.for_each_of(&self.marked, |s| s.on_pointer_move(event, local));
        self.set_gesture(Gesture::DraggingMarked { last_local: local });
        vec![Action::RenderNeeded]
    }

    // --- Helpers ---

    /// Keep the live marquee matches when an exclusive edit replaces the marquee.
    fn stash_preview(&mut self) {
        if let Gesture::Marqueeing { preview, .. } = &mut self.gesture {
            self.pending_preview = std::mem::take(preview);
        }
    }

    fn set_gesture(&mut self, next: Gesture) {
        if self.gesture.name() != next.name() {
            debug!(from = self.gesture.name(), to = next.name(), "gesture transition");
        }
        self.gesture = next;
    }

    fn camera_changed(&self) -> Action {
        Action::CameraChanged { translate: self.camera.translate, scale: self.camera.scale }
    }

    fn require_shape(&self, id: ShapeId) -> Result<(), EditorError> {
        if self.shapes.contains(id) { Ok(()) } else { Err(EditorError::UnknownShape(id)) }
    }
}

fn push_unique(ids: &mut Vec<ShapeId>, id: ShapeId) {
    if !ids.contains(&id) {
        ids.push(id);
    }
}
