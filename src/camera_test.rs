#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn camera(tx: f64, ty: f64, scale: f64) -> Camera {
    Camera { translate: Point::new(tx, ty), scale }
}

// --- Point ---

#[test]
fn point_new() {
    let p = Point::new(3.0, 4.0);
    assert_eq!(p.x, 3.0);
    assert_eq!(p.y, 4.0);
}

#[test]
fn point_default_is_origin() {
    assert_eq!(Point::default(), Point::new(0.0, 0.0));
}

#[test]
fn point_deserializes_from_json() {
    let p: Point = serde_json::from_str(r#"{"x": 1.5, "y": -2.0}"#).unwrap();
    assert_eq!(p, Point::new(1.5, -2.0));
}

// --- Camera defaults ---

#[test]
fn camera_default_is_identity() {
    let cam = Camera::default();
    assert_eq!(cam.translate, Point::new(0.0, 0.0));
    assert_eq!(cam.scale, 1.0);
}

// --- local_detransform ---

#[test]
fn detransform_identity() {
    let cam = Camera::default();
    let local = cam.local_detransform(Point::new(50.0, 75.0));
    assert!(point_approx_eq(local, Point::new(50.0, 75.0)));
}

#[test]
fn detransform_with_translate() {
    let cam = camera(100.0, 50.0, 1.0);
    let local = cam.local_detransform(Point::new(150.0, 75.0));
    assert!(point_approx_eq(local, Point::new(50.0, 25.0)));
}

#[test]
fn detransform_with_scale() {
    let cam = camera(0.0, 0.0, 4.0);
    let local = cam.local_detransform(Point::new(40.0, 80.0));
    assert!(point_approx_eq(local, Point::new(10.0, 20.0)));
}

#[test]
fn detransform_with_translate_and_scale() {
    let cam = camera(10.0, 20.0, 2.0);
    let local = cam.local_detransform(Point::new(30.0, 60.0));
    assert!(point_approx_eq(local, Point::new(10.0, 20.0)));
}

#[test]
fn transform_roundtrip() {
    let cam = camera(-37.5, 12.25, 1.75);
    let device = Point::new(123.0, -45.0);
    let back = cam.local_transform(cam.local_detransform(device));
    assert!(point_approx_eq(back, device));
}

// --- pan_by ---

#[test]
fn pan_by_accumulates() {
    let mut cam = Camera::default();
    cam.pan_by(5.0, -3.0);
    cam.pan_by(2.0, 1.0);
    assert!(point_approx_eq(cam.translate, Point::new(7.0, -2.0)));
}

// --- zoom ---

#[test]
fn zoom_in_multiplies_scale() {
    let mut cam = Camera::default();
    cam.zoom_in(Point::new(0.0, 0.0), 1.5);
    assert!(approx_eq(cam.scale, 1.5));
}

#[test]
fn zoom_out_divides_scale() {
    let mut cam = Camera::default();
    cam.zoom_out(Point::new(0.0, 0.0), 2.0);
    assert!(approx_eq(cam.scale, 0.5));
}

#[test]
fn zoom_preserves_local_point_under_cursor() {
    let mut cam = camera(30.0, -10.0, 1.2);
    let at = Point::new(200.0, 150.0);
    let before = cam.local_detransform(at);
    cam.zoom_in(at, 1.5);
    let after = cam.local_detransform(at);
    assert!(point_approx_eq(before, after));
}

#[test]
fn zoom_in_clamps_max() {
    let mut cam = camera(0.0, 0.0, 9.0);
    cam.zoom_in(Point::new(10.0, 10.0), 1.5);
    assert_eq!(cam.scale, MAX_ZOOM);
}

#[test]
fn zoom_out_clamps_min() {
    let mut cam = camera(0.0, 0.0, 0.12);
    cam.zoom_out(Point::new(10.0, 10.0), 1.5);
    assert_eq!(cam.scale, MIN_ZOOM);
}

#[test]
fn zoom_at_max_keeps_translate() {
    let mut cam = camera(25.0, 40.0, MAX_ZOOM);
    cam.zoom_in(Point::new(300.0, 200.0), 1.5);
    assert!(point_approx_eq(cam.translate, Point::new(25.0, 40.0)));
}
