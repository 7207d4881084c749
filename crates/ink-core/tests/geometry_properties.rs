//! Integration tests: geometry predicates as properties (ink-core).
//!
//! The circle, rectangle and degenerate-segment properties run over
//! randomized inputs; the segment bound also sweeps a fixed grid.

use ink_core::geometry::*;
use proptest::prelude::*;

/// Deterministic sweep of coordinates, including negatives and fractions.
fn coords() -> Vec<f32> {
    (-6..=6).map(|i| i as f32 * 17.5).collect()
}

fn segments() -> Vec<(f32, f32, f32, f32)> {
    let cs = coords();
    let mut out = Vec::new();
    for (i, &x1) in cs.iter().enumerate().step_by(3) {
        for &y1 in cs.iter().skip(i % 2).step_by(4) {
            for &x2 in cs.iter().step_by(5) {
                for &y2 in cs.iter().skip(1).step_by(4) {
                    out.push((x1, y1, x2, y2));
                }
            }
        }
    }
    out
}

fn probes() -> Vec<(f32, f32)> {
    let cs = coords();
    cs.iter()
        .flat_map(|&x| cs.iter().step_by(2).map(move |&y| (x + 3.25, y - 1.5)))
        .collect()
}

fn coord() -> impl Strategy<Value = f32> {
    -500.0f32..500.0
}

proptest! {
    #[test]
    fn circle_hit_matches_midpoint_distance(
        x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord(),
        px in coord(), py in coord(),
    ) {
        let cx = (x1 + x2) / 2.0;
        let cy = (y1 + y2) / 2.0;
        let r = ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt() / 2.0;
        let d = ((px - cx).powi(2) + (py - cy).powi(2)).sqrt();
        // On the rim rounding can go either way.
        prop_assume!((d - r).abs() > 1e-2);
        prop_assert_eq!(point_in_circle(px, py, x1, y1, x2, y2), d <= r);
    }

    #[test]
    fn rect_hit_invariant_under_corner_swap(
        x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord(),
        px in coord(), py in coord(),
    ) {
        let forward = point_in_rect(px, py, x1, y1, x2, y2);
        prop_assert_eq!(forward, point_in_rect(px, py, x2, y2, x1, y1));
        prop_assert_eq!(forward, point_in_rect(px, py, x1, y2, x2, y1));
    }

    #[test]
    fn degenerate_segment_distance_is_euclidean(
        x in coord(), y in coord(), px in coord(), py in coord(),
    ) {
        let expected = ((px - x).powi(2) + (py - y).powi(2)).sqrt();
        let got = distance_to_segment(px, py, x, y, x, y);
        prop_assert!((got - expected).abs() < 1e-2, "got {}, expected {}", got, expected);
    }
}

// ─── Segment distance ───────────────────────────────────────────────────

#[test]
fn segment_distance_never_exceeds_endpoint_distance() {
    for (x1, y1, x2, y2) in segments() {
        for (px, py) in probes().into_iter().step_by(5) {
            let d = distance_to_segment(px, py, x1, y1, x2, y2);
            let to_ends = distance(px, py, x1, y1).min(distance(px, py, x2, y2));
            assert!(d <= to_ends + 1e-3);
        }
    }
}
