#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn bbox() -> BoundingBox {
    BoundingBox::new(100.0, 50.0, 200.0, 100.0)
}

/// Horizontal gradient across `bbox()` with stops at the given offsets.
fn gradient_with(offsets: &[f64]) -> LinearGradient {
    let mut g = LinearGradient::new(Uuid::new_v4());
    for (i, offset) in offsets.iter().enumerate() {
        g.add_stop(GradientStop::new(*offset, format!("#00000{i}")));
    }
    g
}

/// Local point whose projection onto `bbox()`'s horizontal axis is `t`.
fn at_offset(t: f64) -> Point {
    Point::new(100.0 + 200.0 * t, 75.0)
}

fn offsets(g: &LinearGradient) -> Vec<f64> {
    g.stops().iter().map(|s| s.offset).collect()
}

// =============================================================
// StopHandle
// =============================================================

#[test]
fn sentinel_minus_one_is_start() {
    assert_eq!(StopHandle::from_sentinel(-1), Ok(StopHandle::Start));
}

#[test]
fn sentinel_minus_two_is_end() {
    assert_eq!(StopHandle::from_sentinel(-2), Ok(StopHandle::End));
}

#[test]
fn sentinel_non_negative_is_stop_index() {
    assert_eq!(StopHandle::from_sentinel(3), Ok(StopHandle::Stop(3)));
}

#[test]
fn sentinel_other_negative_is_rejected() {
    assert_eq!(StopHandle::from_sentinel(-3), Err(GradientError::InvalidHandle(-3)));
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_gradient_runs_left_to_right() {
    let g = LinearGradient::new(Uuid::new_v4());
    assert_eq!((g.x1, g.y1, g.x2, g.y2), (0.0, 0.0, 1.0, 0.0));
    assert!(g.stops().is_empty());
}

#[test]
fn add_stop_keeps_order() {
    let g = gradient_with(&[0.8, 0.2, 0.5]);
    assert_eq!(offsets(&g), vec![0.2, 0.5, 0.8]);
    assert!(g.is_sorted());
}

#[test]
fn stop_new_clamps_offset() {
    assert_eq!(GradientStop::new(1.7, "#fff").offset, 1.0);
    assert_eq!(GradientStop::new(-0.3, "#fff").offset, 0.0);
}

#[test]
fn validate_rejects_stale_index() {
    let g = gradient_with(&[0.0, 1.0]);
    assert!(g.validate(StopHandle::Stop(1)).is_ok());
    assert_eq!(g.validate(StopHandle::Stop(2)), Err(GradientError::StopOutOfRange { index: 2, len: 2 }));
    assert!(g.validate(StopHandle::Start).is_ok());
}

// =============================================================
// Endpoint drags
// =============================================================

#[test]
fn drag_start_stores_fraction_of_bbox() {
    let mut g = gradient_with(&[]);
    let outcome = g.drag(StopHandle::Start, bbox(), Point::new(150.0, 75.0)).unwrap();
    assert!(approx_eq(g.x1, 0.25));
    assert!(approx_eq(g.y1, 0.25));
    assert_eq!(outcome.handle(), StopHandle::Start);
}

#[test]
fn drag_end_stores_fraction_of_bbox() {
    let mut g = gradient_with(&[]);
    g.drag(StopHandle::End, bbox(), Point::new(300.0, 150.0)).unwrap();
    assert!(approx_eq(g.x2, 1.0));
    assert!(approx_eq(g.y2, 1.0));
}

#[test]
fn endpoint_outside_bbox_is_not_clamped() {
    let mut g = gradient_with(&[]);
    g.drag(StopHandle::End, bbox(), Point::new(500.0, 50.0)).unwrap();
    assert!(approx_eq(g.x2, 2.0));
    assert!(approx_eq(g.y2, 0.0));
}

#[test]
fn endpoint_on_zero_width_bbox_keeps_x() {
    let mut g = gradient_with(&[]);
    let flat = BoundingBox::new(0.0, 0.0, 0.0, 10.0);
    g.drag(StopHandle::End, flat, Point::new(5.0, 5.0)).unwrap();
    assert_eq!(g.x2, 1.0);
    assert!(approx_eq(g.y2, 0.5));
}

// =============================================================
// Stop drags: projection and clamping
// =============================================================

#[test]
fn stop_offset_is_projection_onto_axis() {
    let mut g = gradient_with(&[0.0, 0.5, 1.0]);
    g.drag(StopHandle::Stop(1), bbox(), at_offset(0.4)).unwrap();
    assert!(approx_eq(g.stops()[1].offset, 0.4));
}

#[test]
fn stop_offset_ignores_distance_from_axis() {
    let mut g = gradient_with(&[0.0, 0.5, 1.0]);
    g.drag(StopHandle::Stop(1), bbox(), Point::new(100.0 + 200.0 * 0.6, 900.0)).unwrap();
    assert!(approx_eq(g.stops()[1].offset, 0.6));
}

#[test]
fn stop_offset_clamps_below_zero() {
    let mut g = gradient_with(&[0.5]);
    g.drag(StopHandle::Stop(0), bbox(), at_offset(-0.5)).unwrap();
    assert_eq!(g.stops()[0].offset, 0.0);
}

#[test]
fn stop_offset_clamps_above_one() {
    let mut g = gradient_with(&[0.5]);
    g.drag(StopHandle::Stop(0), bbox(), at_offset(3.0)).unwrap();
    assert_eq!(g.stops()[0].offset, 1.0);
}

#[test]
fn stop_on_diagonal_axis() {
    let mut g = gradient_with(&[0.5]);
    g.x2 = 1.0;
    g.y2 = 1.0;
    // Axis runs (0,0)-(200,100) in shape-local space; its midpoint is (100,50).
    g.drag(StopHandle::Stop(0), bbox(), Point::new(200.0, 100.0)).unwrap();
    assert!(approx_eq(g.stops()[0].offset, 0.5));
}

#[test]
fn degenerate_axis_pins_offset_to_zero() {
    let mut g = gradient_with(&[0.5]);
    g.x2 = g.x1;
    g.y2 = g.y1;
    g.drag(StopHandle::Stop(0), bbox(), at_offset(0.7)).unwrap();
    assert_eq!(g.stops()[0].offset, 0.0);
}

#[test]
fn stale_stop_index_is_an_error() {
    let mut g = gradient_with(&[0.5]);
    let err = g.drag(StopHandle::Stop(4), bbox(), at_offset(0.1)).unwrap_err();
    assert_eq!(err, GradientError::StopOutOfRange { index: 4, len: 1 });
    assert_eq!(offsets(&g), vec![0.5]);
}

// =============================================================
// Stop drags: reordering
// =============================================================

#[test]
fn no_swap_when_still_in_order() {
    let mut g = gradient_with(&[0.0, 0.5, 1.0]);
    let outcome = g.drag(StopHandle::Stop(1), bbox(), at_offset(0.7)).unwrap();
    assert_eq!(outcome.handle(), StopHandle::Stop(1));
    assert!(matches!(outcome, DragOutcome::StopMoved { reorder: None, .. }));
}

#[test]
fn dragging_past_next_swaps_forward() {
    let mut g = gradient_with(&[0.0, 0.4, 0.6, 1.0]);
    let dragged = g.stops()[1].id;
    let outcome = g.drag(StopHandle::Stop(1), bbox(), at_offset(0.7)).unwrap();
    assert_eq!(outcome.handle(), StopHandle::Stop(2));
    assert_eq!(g.stops()[2].id, dragged);
    assert!(g.is_sorted());
}

#[test]
fn dragging_below_previous_swaps_backward() {
    let mut g = gradient_with(&[0.0, 0.4, 0.6, 1.0]);
    let dragged = g.stops()[2].id;
    let outcome = g.drag(StopHandle::Stop(2), bbox(), at_offset(0.3)).unwrap();
    assert_eq!(outcome.handle(), StopHandle::Stop(1));
    assert_eq!(g.stops()[1].id, dragged);
    assert!(g.is_sorted());
}

#[test]
fn swap_reports_visual_reorder() {
    let mut g = gradient_with(&[0.2, 0.8]);
    let first = g.stops()[0].id;
    let second = g.stops()[1].id;
    let outcome = g.drag(StopHandle::Stop(0), bbox(), at_offset(0.9)).unwrap();
    let DragOutcome::StopMoved { reorder: Some(reorder), stop, .. } = outcome else {
        panic!("expected a reorder, got {outcome:?}");
    };
    assert_eq!(stop, first);
    assert_eq!(reorder, StopReorder { element: second, before: first });
}

#[test]
fn equal_offsets_do_not_swap() {
    let mut g = gradient_with(&[0.0, 0.5, 1.0]);
    let outcome = g.drag(StopHandle::Stop(1), bbox(), at_offset(1.0)).unwrap();
    assert_eq!(outcome.handle(), StopHandle::Stop(1));
}

#[test]
fn crossing_two_neighbors_swaps_only_once() {
    let mut g = gradient_with(&[0.1, 0.3, 0.5, 0.9]);
    let dragged = g.stops()[0].id;
    let outcome = g.drag(StopHandle::Stop(0), bbox(), at_offset(0.7)).unwrap();
    assert_eq!(outcome.handle(), StopHandle::Stop(1));
    assert_eq!(g.stops()[1].id, dragged);
    // The dragged stop (0.7) now sits before 0.5: one move corrects one step only.
    let got = offsets(&g);
    for (actual, expected) in got.iter().zip([0.3, 0.7, 0.5, 0.9]) {
        assert!(approx_eq(*actual, expected), "offsets {got:?}");
    }
    assert!(!g.is_sorted());
}

#[test]
fn repeated_moves_finish_a_long_crossing() {
    let mut g = gradient_with(&[0.1, 0.3, 0.5, 0.9]);
    let mut handle = StopHandle::Stop(0);
    for _ in 0..3 {
        handle = g.drag(handle, bbox(), at_offset(0.7)).unwrap().handle();
    }
    assert_eq!(handle, StopHandle::Stop(2));
    assert!(g.is_sorted());
}

#[test]
fn sorted_after_every_single_neighbor_crossing() {
    let initial = [0.1, 0.3, 0.6, 0.9];
    for start in 0..initial.len() {
        // Targets that cross at most one neighbor of the dragged stop.
        let lower = if start >= 2 { initial[start - 2] } else { 0.0 };
        let upper = initial.get(start + 2).copied().unwrap_or(1.0);
        for step in 0..=20 {
            let target = f64::from(step) / 20.0;
            if target < lower || target > upper {
                continue;
            }
            let mut g = gradient_with(&initial);
            g.drag(StopHandle::Stop(start), bbox(), at_offset(target)).unwrap();
            assert!(g.is_sorted(), "unsorted after moving stop {start} to {target}: {:?}", offsets(&g));
        }
    }
}

#[test]
fn swap_adjacent_out_of_range_is_none() {
    let mut g = gradient_with(&[0.2, 0.8]);
    assert!(g.swap_adjacent(1).is_none());
    assert_eq!(offsets(&g), vec![0.2, 0.8]);
}

#[test]
fn swap_adjacent_at_max_index_is_none() {
    let mut g = gradient_with(&[0.2, 0.8]);
    assert!(g.swap_adjacent(usize::MAX).is_none());
    assert_eq!(offsets(&g), vec![0.2, 0.8]);
}

// =============================================================
// Sorting stops from the host
// =============================================================

/// A gradient decoded from host JSON whose stops arrive in `offsets` order.
fn decoded_with(offsets: &[f64]) -> LinearGradient {
    let stops: Vec<serde_json::Value> = offsets
        .iter()
        .map(|o| serde_json::json!({ "id": Uuid::new_v4(), "offset": o, "color": "#000", "opacity": 1.0 }))
        .collect();
    let json = serde_json::json!({
        "id": Uuid::new_v4(),
        "editing_shape": Uuid::new_v4(),
        "x1": 0.0, "y1": 0.0, "x2": 1.0, "y2": 0.0,
        "stops": stops,
    });
    serde_json::from_value(json).unwrap()
}

#[test]
fn decoded_gradient_keeps_host_order() {
    let g = decoded_with(&[0.9, 0.1]);
    assert!(!g.is_sorted());
}

#[test]
fn sort_stops_restores_ascending_order() {
    let mut g = decoded_with(&[0.9, 0.1, 0.5]);
    let ids: Vec<StopId> = g.stops().iter().map(|s| s.id).collect();
    assert!(g.sort_stops());
    assert_eq!(offsets(&g), vec![0.1, 0.5, 0.9]);
    assert_eq!(g.stops()[0].id, ids[1]);
    assert_eq!(g.stops()[2].id, ids[0]);
}

#[test]
fn sort_stops_on_sorted_gradient_is_noop() {
    let mut g = gradient_with(&[0.2, 0.2, 0.8]);
    let before = g.clone();
    assert!(!g.sort_stops());
    assert_eq!(g, before);
}
