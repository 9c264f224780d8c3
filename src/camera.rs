#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ZOOM, MIN_ZOOM};

/// A point in either device (viewport) or local (document) space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport transform for the editor surface.
///
/// `translate` is in device pixels.
/// `scale` is a zoom factor (1.0 = no zoom).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Camera {
    pub translate: Point,
    pub scale: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { translate: Point::default(), scale: 1.0 }
    }
}

impl Camera {
    /// Convert a device-space point to local document coordinates.
    #[must_use]
    pub fn local_detransform(&self, device: Point) -> Point {
        Point {
            x: (device.x - self.translate.x) / self.scale,
            y: (device.y - self.translate.y) / self.scale,
        }
    }

    /// Convert a local document point back to device coordinates.
    #[must_use]
    pub fn local_transform(&self, local: Point) -> Point {
        Point {
            x: local.x * self.scale + self.translate.x,
            y: local.y * self.scale + self.translate.y,
        }
    }

    /// Shift the viewport by a device-space delta.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.translate.x += dx;
        self.translate.y += dy;
    }

    /// Zoom in by `step` around the device point `at`.
    pub fn zoom_in(&mut self, at: Point, step: f64) {
        self.zoom_to(at, self.scale * step);
    }

    /// Zoom out by `step` around the device point `at`.
    pub fn zoom_out(&mut self, at: Point, step: f64) {
        self.zoom_to(at, self.scale / step);
    }

    /// Set the scale (clamped) while keeping the local point under `at` fixed.
    fn zoom_to(&mut self, at: Point, target: f64) {
        let anchor = self.local_detransform(at);
        self.scale = target.clamp(MIN_ZOOM, MAX_ZOOM);
        self.translate = Point {
            x: at.x - anchor.x * self.scale,
            y: at.y - anchor.y * self.scale,
        };
    }
}
