//! Input model: host pointer/wheel events, edit modes, and the gesture state machine.
//!
//! `PointerEvent` and `WheelEvent` mirror what the host page reports for DOM
//! pointer and wheel events, and deserialize straight from its JSON.
//! `Gesture` is the single active interaction between pointer-down and
//! pointer-up. Each variant carries exactly the context that interaction
//! needs, so combinations like "panning while drawing a marquee" cannot exist.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::geom::SelectionBox;
use crate::gradient::StopHandle;
use crate::shape::ShapeId;

/// Mouse button identifier, built from the DOM `button` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i16", into = "i16")]
pub enum Button {
    /// Left mouse button (or single-finger tap). Code 0.
    #[default]
    Primary,
    /// Middle mouse button (scroll wheel click). Code 1.
    Middle,
    /// Right mouse button (or two-finger tap). Code 2.
    Secondary,
    /// Any other code (back, forward, pen eraser, ...).
    Other(i16),
}

impl From<i16> for Button {
    fn from(code: i16) -> Self {
        match code {
            0 => Self::Primary,
            1 => Self::Middle,
            2 => Self::Secondary,
            other => Self::Other(other),
        }
    }
}

impl From<Button> for i16 {
    fn from(button: Button) -> Self {
        match button {
            Button::Primary => 0,
            Button::Middle => 1,
            Button::Secondary => 2,
            Button::Other(code) => code,
        }
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held. Ctrl is the multi-select modifier.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// DOM event type, as far as the editor cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    /// A `contextmenu` event routed through the pointer-up handler.
    ContextMenu,
    /// Any ordinary pointer event (`pointerdown`, `pointermove`, ...).
    #[default]
    #[serde(other)]
    Pointer,
}

/// A pointer event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Position relative to the surface, in device pixels.
    pub offset: Point,
    /// Button that changed state (for down/up events).
    #[serde(default)]
    pub button: Button,
    /// Modifier keys held.
    #[serde(default)]
    pub modifiers: Modifiers,
    /// DOM event type.
    #[serde(default, rename = "type")]
    pub kind: PointerKind,
}

impl PointerEvent {
    /// An ordinary pointer event at `(x, y)` for `button`.
    #[must_use]
    pub fn new(x: f64, y: f64, button: Button) -> Self {
        Self { offset: Point::new(x, y), button, ..Self::default() }
    }

    /// The same event with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(self, modifiers: Modifiers) -> Self {
        Self { modifiers, ..self }
    }

    /// The same event reported as a `contextmenu` event.
    #[must_use]
    pub fn as_context_menu(self) -> Self {
        Self { kind: PointerKind::ContextMenu, ..self }
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    #[serde(default)]
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    #[serde(default)]
    pub dy: f64,
}

/// A wheel event as delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WheelEvent {
    /// Position relative to the surface, in device pixels.
    pub offset: Point,
    /// Scroll amount.
    pub delta: WheelDelta,
}

/// Editor-wide edit mode, set by tools and shapes outside the pointer core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    /// Nothing special; clicks select.
    #[default]
    None,
    /// A new shape is being placed; clicking empty canvas must not unselect.
    Add,
    /// A one-shot move gesture; ends on the next pointer-up.
    Move,
}

/// The active interaction.
///
/// Pointer-move dispatches on this in priority order: panning, gradient
/// editing, single-shape editing, then marquee or group drag.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Middle button held; the viewport follows the pointer.
    Panning {
        /// Device-space position of the previous pointer event.
        anchor: Point,
    },
    /// A gradient endpoint or color stop is being dragged.
    EditingGradient {
        /// Which handle is under the pointer. Tracks the stop across reorders.
        handle: StopHandle,
    },
    /// One shape owns the pointer exclusively.
    EditingShape {
        /// Id of the shape being edited.
        id: ShapeId,
    },
    /// A marquee is being drawn.
    Marqueeing {
        /// The marquee in local space, with signed extent.
        marquee: SelectionBox,
        /// Live preview of shapes matched by the marquee.
        preview: Vec<ShapeId>,
    },
    /// Marked shapes are following the pointer.
    DraggingMarked {
        /// Local-space position of the previous move.
        last_local: Point,
    },
}

impl Gesture {
    /// Short name used in log fields.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Panning { .. } => "panning",
            Self::EditingGradient { .. } => "editing_gradient",
            Self::EditingShape { .. } => "editing_shape",
            Self::Marqueeing { .. } => "marqueeing",
            Self::DraggingMarked { .. } => "dragging_marked",
        }
    }

    /// Whether no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
