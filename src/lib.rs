//! Pointer-interaction core for a vector-graphics editor surface.
//!
//! The host forwards raw pointer and wheel events to [`engine::EditorCore`],
//! which decides per event whether the user is panning, drawing a marquee,
//! dragging marked shapes, editing a single shape, or dragging a gradient
//! handle, and applies the matching mutation. Rendering, shape internals,
//! and document persistence stay with the host; the core reports what
//! changed through [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Event dispatcher, [`engine::EditorCore`] and its actions |
//! | [`input`] | Host event types, edit modes, and the gesture state machine |
//! | [`gradient`] | Linear gradient endpoint and stop drags |
//! | [`select`] | Window and crossing box-selection queries |
//! | [`shape`] | Shape capability trait and the ordered shape store |
//! | [`geom`] | Vector primitives and the signed marquee box |
//! | [`camera`] | Device/local coordinate transform, pan and zoom |
//! | [`config`] | Host-provided settings |
//! | [`consts`] | Shared numeric constants (zoom limits, epsilons) |

pub mod camera;
pub mod config;
pub mod consts;
pub mod engine;
pub mod geom;
pub mod gradient;
pub mod input;
pub mod select;
pub mod shape;

#[cfg(test)]
#[path = "fixtures_test.rs"]
mod fixtures;
