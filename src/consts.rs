//! Shared numeric constants for the surface crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest scale the camera may reach when zooming out.
pub const MIN_ZOOM: f64 = 0.1;

/// Largest scale the camera may reach when zooming in.
pub const MAX_ZOOM: f64 = 10.0;

/// Default multiplicative zoom step applied per wheel notch.
pub const DEFAULT_ZOOM_STEP: f64 = 1.5;

// ── Gradients ───────────────────────────────────────────────────

/// Squared axis length below which a gradient axis is treated as degenerate.
pub const AXIS_EPSILON: f64 = 1e-12;
